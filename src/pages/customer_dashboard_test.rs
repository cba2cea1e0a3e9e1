use super::*;

#[test]
fn every_deep_link_opens_its_panel() {
    assert_eq!(panel_for_path("/flights"), Panel::Flights);
    assert_eq!(panel_for_path("/hotels"), Panel::Hotels);
    assert_eq!(panel_for_path("/trains"), Panel::Trains);
    assert_eq!(panel_for_path("/buses"), Panel::Buses);
    assert_eq!(panel_for_path("/packages"), Panel::Packages);
    assert_eq!(panel_for_path("/activities"), Panel::Activities);
    assert_eq!(panel_for_path("/my-bookings"), Panel::Bookings);
}

#[test]
fn dashboard_root_and_unknown_paths_default_to_flights() {
    assert_eq!(panel_for_path("/customer-dashboard"), Panel::Flights);
    assert_eq!(panel_for_path("/somewhere-else"), Panel::Flights);
}

#[test]
fn trailing_slash_is_tolerated() {
    assert_eq!(panel_for_path("/hotels/"), Panel::Hotels);
}
