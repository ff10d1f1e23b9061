// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{open_db, seed_delivery_option, seed_member, NOW};
use crate::data_models::NewDeliveryRequest;
use crate::Persistence;
use harborlight_audit::Actor;
use harborlight_domain::Member;

fn sample_request(member_id: i64, delivery_option_id: i64) -> NewDeliveryRequest {
    NewDeliveryRequest {
        member_id,
        delivery_option_id,
        delivery_address: "12 Harbour Lane".to_string(),
        notes: None,
        status: "PENDING".to_string(),
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
        revision: 1,
    }
}

#[test]
fn test_create_delivery_request_flips_member_flag() {
    let mut db: Persistence = open_db();
    let member_id: i64 = seed_member(&mut db);
    let option_id: i64 = seed_delivery_option(&mut db, true);

    let before: Member = match db.get_member(member_id) {
        Ok(Some(member)) => member,
        Ok(None) => panic!("Member not found"),
        Err(e) => panic!("Failed to load member: {e}"),
    };
    assert!(!before.has_delivery_request);

    if let Err(e) = db.create_delivery_request(
        &sample_request(member_id, option_id),
        &Actor::public("rosa@example.org"),
        "Weekly groceries to 12 Harbour Lane",
        &[],
    ) {
        panic!("Failed to create delivery request: {e}");
    }

    let after: Member = match db.get_member(member_id) {
        Ok(Some(member)) => member,
        Ok(None) => panic!("Member not found"),
        Err(e) => panic!("Failed to load member: {e}"),
    };
    assert!(after.has_delivery_request);
}

#[test]
fn test_list_delivery_options_active_only_hides_disabled() {
    let mut db: Persistence = open_db();
    let active_id: i64 = seed_delivery_option(&mut db, true);
    let _disabled_id: i64 = seed_delivery_option(&mut db, false);

    let visible = match db.list_delivery_options(true) {
        Ok(options) => options,
        Err(e) => panic!("Failed to list options: {e}"),
    };
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, Some(active_id));

    let all = match db.list_delivery_options(false) {
        Ok(options) => options,
        Err(e) => panic!("Failed to list options: {e}"),
    };
    assert_eq!(all.len(), 2);
}
