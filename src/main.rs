//! Authgate entry point
//!
//! On the web: wires the browser's LocalStorage into the auth pages.
//! Natively: runs a walkthrough against in-memory storage and backend.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use authgate::consts::VISITS_KEY;
    use authgate::persistence::Persisted;
    use authgate::ui::SignInView;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Authgate starting...");

        // Resolved once, passed to everything that persists
        let storage = authgate::detect_storage();

        let mut visits = Persisted::new(VISITS_KEY, 0_u64);
        if visits.activate(storage.clone()) {
            visits.update(|n| n + 1);
            log::info!("Visit #{}", visits.value());
        }

        let mut sign_in = SignInView::new();
        sign_in.mount(storage);
        if !sign_in.form.email.is_empty() {
            log::info!("Sign-in pre-filled for {}", sign_in.form.email);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use authgate::auth::{AuthBackend, MemoryAuth, SignUpForm};
    use authgate::consts::VISITS_KEY;
    use authgate::persistence::Persisted;
    use authgate::platform::{MemoryStore, SafeStorage};
    use authgate::ui::{Landing, LandingPage, LogNotifier, SignInView, SignUpView, SubmitOutcome};

    env_logger::init();
    log::info!("Authgate (native) starting...");

    // Server render: nothing is persisted
    let server = authgate::detect_storage();
    let mut visits = Persisted::new(VISITS_KEY, 0_u64);
    visits.activate(server);
    println!("server render: visits={} ready={}", visits.value(), visits.is_ready());

    // "Browser" backed by an in-memory store
    let browser = SafeStorage::new(MemoryStore::new());
    visits.activate(browser.clone());
    visits.update(|n| n + 1);
    println!("hydrated: visits={} ready={}", visits.value(), visits.is_ready());

    let mut auth = MemoryAuth::new();
    let mut sign_up = SignUpView::new();
    sign_up.form = SignUpForm {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        password: "analytical".into(),
        confirm_password: "analytical".into(),
    };
    match sign_up.submit(&mut auth) {
        SubmitOutcome::Redirect(path) => println!("sign-up ok, redirect to {path}"),
        SubmitOutcome::Invalid(errors) => {
            for e in errors {
                println!("{}: {e}", e.field.as_str());
            }
        }
        SubmitOutcome::Failed => println!("sign-up failed: {:?}", sign_up.error()),
    }

    let landing = LandingPage::new();
    if let Landing::SignedIn { greeting } = landing.render(&auth) {
        println!("{greeting}");
    }
    landing.logout(&mut auth);

    let mut sign_in = SignInView::new();
    sign_in.mount(browser.clone());
    sign_in.form.email = "ada@example.com".into();
    sign_in.form.password = "analytical".into();
    let outcome = sign_in.submit(&mut auth);
    println!("sign-in: {outcome:?}");

    let mut next_visit = SignInView::new();
    next_visit.mount(browser);
    println!("next visit pre-fills: {:?}", next_visit.form.email);

    let quick = LandingPage {
        name: String::new(),
        email: "nobody@example.com".into(),
        password: "x".into(),
    };
    auth.sign_out();
    quick.login(&mut auth, &mut LogNotifier);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Start-up runs from wasm_main
}
