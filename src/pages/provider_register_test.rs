use super::*;

#[test]
fn steps_advance_contact_service_credentials() {
    assert_eq!(next_step(ProviderStep::Contact), Some(ProviderStep::Service));
    assert_eq!(next_step(ProviderStep::Service), Some(ProviderStep::Credentials));
    assert_eq!(next_step(ProviderStep::Credentials), None);
}

#[test]
fn steps_go_back_in_reverse() {
    assert_eq!(prev_step(ProviderStep::Credentials), Some(ProviderStep::Service));
    assert_eq!(prev_step(ProviderStep::Service), Some(ProviderStep::Contact));
    assert_eq!(prev_step(ProviderStep::Contact), None);
}

#[test]
fn step_numbers_and_titles_cover_all_steps() {
    assert_eq!(step_number(ProviderStep::Contact), 1);
    assert_eq!(step_number(ProviderStep::Service), 2);
    assert_eq!(step_number(ProviderStep::Credentials), 3);
    assert_eq!(step_title(ProviderStep::Contact), "Contact details");
    assert_eq!(step_title(ProviderStep::Service), "Your service");
    assert_eq!(step_title(ProviderStep::Credentials), "Account credentials");
}
