//! The admin allow-list gate: fail-closed semantics and the fixed rejection
//! payloads handlers surface to callers.

use waterlife_admin::error::{NOT_ADMIN, NOT_AUTHENTICATED};
use waterlife_admin::services::auth::is_admin_email;
use waterlife_core::AdminAllowList;

#[test]
fn membership_is_case_insensitive() {
    let list = AdminAllowList::parse("admin@example.com");

    assert_eq!(
        is_admin_email(Some("Admin@Example.com"), &list),
        is_admin_email(Some("admin@example.com"), &list)
    );
    assert!(is_admin_email(Some("ADMIN@EXAMPLE.COM"), &list));
}

#[test]
fn membership_is_trim_tolerant() {
    let list = AdminAllowList::parse("  admin@example.com  ");
    assert!(is_admin_email(Some(" admin@example.com "), &list));
}

#[test]
fn empty_configuration_denies_everyone() {
    let empty = AdminAllowList::parse("");
    assert!(!is_admin_email(Some("anything@x.com"), &empty));

    let default = AdminAllowList::default();
    assert!(!is_admin_email(Some("anything@x.com"), &default));
}

#[test]
fn absent_input_is_denied_regardless_of_configuration() {
    let list = AdminAllowList::parse("a@x.com, b@y.com");
    assert!(!is_admin_email(None, &list));
    assert!(!is_admin_email(None, &AdminAllowList::default()));
    assert!(!is_admin_email(Some(""), &list));
}

#[test]
fn two_entry_example() {
    // The spec.md example list.
    let list = AdminAllowList::parse("a@x.com, b@y.com");

    assert!(is_admin_email(Some("b@y.com"), &list));
    assert!(!is_admin_email(Some("c@z.com"), &list));
}

#[test]
fn stray_commas_do_not_create_phantom_admins() {
    let list = AdminAllowList::parse("a@x.com,, ,b@y.com,");

    assert_eq!(list.len(), 2);
    assert!(!is_admin_email(Some(""), &list));
    assert!(!is_admin_email(Some("   "), &list));
}

#[test]
fn rejection_payloads_are_fixed_records() {
    assert_eq!(NOT_ADMIN.status, 403);
    assert_eq!(
        NOT_ADMIN.error,
        "Forbidden: this account does not have admin access."
    );

    assert_eq!(NOT_AUTHENTICATED.status, 401);
    assert_eq!(
        NOT_AUTHENTICATED.error,
        "Unauthorized: please sign in to continue."
    );
}

#[test]
fn rejection_payloads_serialize_with_status_in_body() {
    let body = serde_json::to_value(NOT_ADMIN).expect("serialize");
    assert_eq!(body["error"], NOT_ADMIN.error);
    assert_eq!(body["status"], 403);

    let body = serde_json::to_value(NOT_AUTHENTICATED).expect("serialize");
    assert_eq!(body["status"], 401);
}
