use super::*;

#[test]
fn registered_banner_matches_query_flag() {
    assert_eq!(registered_banner("?registered=1"), Some("Account created. Sign in to continue."));
    assert_eq!(
        registered_banner("?from=x&registered=1"),
        Some("Account created. Sign in to continue.")
    );
}

#[test]
fn registered_banner_absent_otherwise() {
    assert_eq!(registered_banner(""), None);
    assert_eq!(registered_banner("?registered=0"), None);
    assert_eq!(registered_banner("?other=1"), None);
}
