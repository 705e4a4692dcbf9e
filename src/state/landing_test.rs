use super::*;

#[test]
fn landing_view_default_is_landing() {
    assert_eq!(LandingView::default(), LandingView::Landing);
}

#[test]
fn login_and_sign_up_return_to_landing_on_back() {
    let mut view = LandingView::default();
    view.show_login();
    assert_eq!(view, LandingView::Login);
    view.back();
    assert_eq!(view, LandingView::Landing);

    view.show_sign_up();
    assert_eq!(view, LandingView::SignUp);
    view.back();
    assert_eq!(view, LandingView::Landing);
}

#[test]
fn entry_depends_on_token() {
    assert_eq!(entry_for(&Session::anonymous()), Entry::Landing(LandingView::Landing));
    assert_eq!(entry_for(&Session::new(Some("tok".into()), None)), Entry::Dashboard);
}
