use std::sync::{Arc, Mutex};

use super::*;

type Visits = Arc<Mutex<Vec<(String, bool)>>>;

fn recording_redirect() -> (Owner, GuardRedirect<impl Fn(&str, NavigateOptions) + Clone + 'static>, Visits) {
    let owner = Owner::new();
    owner.set();
    let visits = Visits::default();
    let recorder = {
        let visits = Arc::clone(&visits);
        move |target: &str, options: NavigateOptions| {
            visits.lock().unwrap().push((target.to_owned(), options.replace));
        }
    };
    (owner, GuardRedirect::new(recorder), visits)
}

#[test]
fn redirect_decision_yields_target_once() {
    let decision = GuardDecision::Redirect("/login".to_owned());
    assert_eq!(pending_redirect(&decision, false), Some("/login"));
    assert_eq!(pending_redirect(&decision, true), None);
}

#[test]
fn pending_never_redirects() {
    assert_eq!(pending_redirect(&GuardDecision::Pending, false), None);
}

#[test]
fn render_never_redirects() {
    assert_eq!(pending_redirect(&GuardDecision::Render, false), None);
}

#[test]
fn guard_redirect_navigates_once_per_mount() {
    let (_owner, redirect, visits) = recording_redirect();

    redirect.apply(&GuardDecision::Pending);
    assert!(visits.lock().unwrap().is_empty());
    assert!(!redirect.redirected().get_untracked());

    redirect.apply(&GuardDecision::Redirect("/login".to_owned()));
    redirect.apply(&GuardDecision::Redirect("/dashboard".to_owned()));
    redirect.apply(&GuardDecision::Render);

    assert_eq!(*visits.lock().unwrap(), vec![("/login".to_owned(), true)]);
    assert!(redirect.redirected().get_untracked());
}

#[test]
fn guard_redirect_stays_idle_while_rendering() {
    let (_owner, redirect, visits) = recording_redirect();
    redirect.apply(&GuardDecision::Render);
    assert!(visits.lock().unwrap().is_empty());
    assert!(!redirect.redirected().get_untracked());
}
