//! Account registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Registers through the session store, which signs the new account in. A
//! patient registration then creates the matching patient record so the
//! portal has something to show on first visit.
//!
//! ERROR HANDLING
//! ==============
//! Validation runs before any request and reports the first failing rule.
//! A failure while creating the patient record leaves the account signed in;
//! the message is shown and the user can reach the portal from the home page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{AuthError, AuthUser, RegistrationProfile, Role, guard, routes};

use crate::config::ApiConfig;
use crate::net::api;
use crate::net::types::NewPatient;
use crate::state::auth::{AuthContext, use_auth};

pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// Raw registration form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// `patient`, `doctor`, `admin`, or empty before a choice is made.
    pub role: String,
    pub specialty: String,
    pub age: String,
    pub gender: String,
    pub blood_group: String,
    pub contact: String,
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl RegistrationForm {
    /// Check the form and build the registration request.
    ///
    /// Rules run in a fixed order and the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the message to show for the first rule that fails.
    pub fn validate(&self) -> Result<RegistrationProfile, &'static str> {
        let required = [&self.first_name, &self.last_name, &self.email, &self.password, &self.role];
        if !required.iter().all(|v| filled(v)) {
            return Err("All required fields must be filled");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters long");
        }

        let role = Role::from(self.role.trim());
        let mut profile = RegistrationProfile {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            role: role.clone(),
            specialty: None,
            age: None,
            gender: None,
            blood_group: None,
            contact: None,
        };

        match role {
            Role::Doctor => {
                if !filled(&self.specialty) {
                    return Err("Specialty is required for doctors");
                }
                profile.specialty = Some(self.specialty.trim().to_owned());
            }
            Role::Patient => {
                let patient_fields = [&self.age, &self.gender, &self.blood_group, &self.contact];
                if !patient_fields.iter().all(|v| filled(v)) {
                    return Err("All patient information fields are required");
                }
                let age = self.age.trim().parse::<u32>().map_err(|_| "Age must be a whole number")?;
                profile.age = Some(age);
                profile.gender = Some(self.gender.trim().to_owned());
                profile.blood_group = Some(self.blood_group.trim().to_owned());
                profile.contact = Some(self.contact.trim().to_owned());
            }
            Role::Admin | Role::Other(_) => {}
        }
        Ok(profile)
    }
}

/// Create the patient record for a freshly registered patient and return its
/// portal route.
async fn create_patient_record(
    auth: &AuthContext,
    config: &ApiConfig,
    profile: &RegistrationProfile,
) -> Result<String, String> {
    let token = auth.store.token().ok_or_else(|| "No authentication token available".to_owned())?;
    let patient = NewPatient::from_registration(profile).ok_or_else(|| "Patient details are incomplete".to_owned())?;
    let record = api::create_patient(config, &token, &patient).await.map_err(|e| e.to_string())?;
    let patient_id = record
        .portal_id()
        .ok_or_else(|| "Patient ID not received from server".to_owned())?
        .to_owned();
    log::info!("patient record created");
    if let Err(e) = auth.store.attach_patient_id(&patient_id) {
        log::warn!("could not record patient id: {e}");
    }
    Ok(routes::patient_portal(&patient_id))
}

async fn after_registration(
    auth: &AuthContext,
    config: &ApiConfig,
    profile: &RegistrationProfile,
    user: &AuthUser,
) -> Result<String, String> {
    if user.role == Role::Patient {
        create_patient_record(auth, config, profile).await
    } else {
        Ok(guard::role_home(user))
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let config = expect_context::<ApiConfig>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::default());
    let error = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let session_loading = Memo::new(move |_| auth.state.get().loading);
    let role = Memo::new(move |_| form.with(|f| f.role.clone()));

    let on_submit = {
        let auth = auth.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            let profile = match form.with_untracked(RegistrationForm::validate) {
                Ok(profile) => profile,
                Err(message) => {
                    error.set(message.to_owned());
                    return;
                }
            };
            error.set(String::new());
            submitting.set(true);

            let auth = auth.clone();
            let config = config.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match auth.store.register(&profile).await {
                    Ok(user) => match after_registration(&auth, &config, &profile, &user).await {
                        Ok(target) => navigate(&target, NavigateOptions::default()),
                        Err(message) => error.set(message),
                    },
                    Err(AuthError::Superseded { .. }) => {}
                    Err(e) => error.set(e.to_string()),
                }
                submitting.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <a href="/" class="login-page__brand">"SehatNama"</a>
            <div class="login-card login-card--wide">
                <h1>"Create an account"</h1>
                <p class="login-card__subtitle">"Enter your information to create your SehatNama account"</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error">{move || error.get()}</p>
                    </Show>
                    <div class="login-form__row">
                        <label>
                            "First name"
                            <input
                                class="login-input"
                                placeholder="John"
                                required
                                prop:value=move || form.with(|f| f.first_name.clone())
                                on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Last name"
                            <input
                                class="login-input"
                                placeholder="Doe"
                                required
                                prop:value=move || form.with(|f| f.last_name.clone())
                                on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <label>
                        "Email"
                        <input
                            class="login-input"
                            type="email"
                            placeholder="m@example.com"
                            required
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            required
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Confirm Password"
                        <input
                            class="login-input"
                            type="password"
                            required
                            prop:value=move || form.with(|f| f.confirm_password.clone())
                            on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Register as"
                        <select
                            class="login-input"
                            prop:value=move || role.get()
                            on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                        >
                            <option value="">"Select role"</option>
                            <option value="patient">"Patient"</option>
                            <option value="doctor">"Doctor"</option>
                            <option value="admin">"Administrator"</option>
                        </select>
                    </label>
                    <Show when=move || role.get() == "doctor">
                        <label>
                            "Medical Specialty"
                            <input
                                class="login-input"
                                placeholder="e.g., Cardiology, Pediatrics"
                                prop:value=move || form.with(|f| f.specialty.clone())
                                on:input=move |ev| form.update(|f| f.specialty = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <Show when=move || role.get() == "patient">
                        <label>
                            "Age"
                            <input
                                class="login-input"
                                type="number"
                                min="0"
                                max="120"
                                placeholder="30"
                                prop:value=move || form.with(|f| f.age.clone())
                                on:input=move |ev| form.update(|f| f.age = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Gender"
                            <select
                                class="login-input"
                                prop:value=move || form.with(|f| f.gender.clone())
                                on:change=move |ev| form.update(|f| f.gender = event_target_value(&ev))
                            >
                                <option value="">"Select gender"</option>
                                {GENDERS.iter().map(|g| view! { <option value=*g>{*g}</option> }).collect_view()}
                            </select>
                        </label>
                        <label>
                            "Blood Group"
                            <select
                                class="login-input"
                                prop:value=move || form.with(|f| f.blood_group.clone())
                                on:change=move |ev| form.update(|f| f.blood_group = event_target_value(&ev))
                            >
                                <option value="">"Select blood group"</option>
                                {BLOOD_GROUPS.iter().map(|b| view! { <option value=*b>{*b}</option> }).collect_view()}
                            </select>
                        </label>
                        <label>
                            "Contact Number"
                            <input
                                class="login-input"
                                type="tel"
                                placeholder="+92 300 1234567"
                                prop:value=move || form.with(|f| f.contact.clone())
                                on:input=move |ev| form.update(|f| f.contact = event_target_value(&ev))
                            />
                        </label>
                    </Show>
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || submitting.get() || session_loading.get()
                    >
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already have an account? "
                    <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
