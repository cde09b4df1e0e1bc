//! Login form shown in the anonymous flow.

use dioxus::prelude::*;
use store::{validate_login, LoginFields};

use crate::controller::Msg;

/// Turn the form contents into the message for the router: a login attempt
/// when the fields validate, the first validation failure otherwise.
pub fn submission(fields: &LoginFields) -> Msg {
    match validate_login(fields) {
        Ok(candidate) => Msg::Login(candidate),
        Err(e) => {
            tracing::debug!(field = e.field(), "login form rejected");
            Msg::Error(e.into())
        }
    }
}

#[component]
pub fn LoginForm() -> Element {
    let router = use_coroutine_handle::<Msg>();
    let mut fields = use_signal(LoginFields::default);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        router.send(submission(&fields.read()));
    };

    let gender = fields().gender.unwrap_or_default();

    rsx! {
        form {
            id: "login-form",
            class: "login-form",
            onsubmit: onsubmit,

            label { r#for: "login-name", "Name" }
            input {
                id: "login-name",
                r#type: "text",
                value: fields().name,
                oninput: move |evt: FormEvent| fields.write().name = evt.value(),
            }

            label { r#for: "login-pass", "Password" }
            input {
                id: "login-pass",
                r#type: "password",
                value: fields().pass,
                oninput: move |evt: FormEvent| fields.write().pass = evt.value(),
            }

            label { r#for: "login-age", "Age" }
            input {
                id: "login-age",
                r#type: "number",
                value: fields().age,
                oninput: move |evt: FormEvent| fields.write().age = evt.value(),
            }

            fieldset {
                legend { "Gender" }
                label {
                    input {
                        r#type: "radio",
                        name: "gender",
                        value: "m",
                        checked: gender == "m",
                        onchange: move |_| fields.write().gender = Some("m".to_string()),
                    }
                    " Male"
                }
                label {
                    input {
                        r#type: "radio",
                        name: "gender",
                        value: "f",
                        checked: gender == "f",
                        onchange: move |_| fields.write().gender = Some("f".to_string()),
                    }
                    " Female"
                }
            }

            fieldset {
                legend { "Looking for" }
                label {
                    input {
                        r#type: "checkbox",
                        name: "looking_for_m",
                        checked: fields().looking_for_m,
                        onchange: move |evt: FormEvent| fields.write().looking_for_m = evt.checked(),
                    }
                    " Men"
                }
                label {
                    input {
                        r#type: "checkbox",
                        name: "looking_for_f",
                        checked: fields().looking_for_f,
                        onchange: move |evt: FormEvent| fields.write().looking_for_f = evt.checked(),
                    }
                    " Women"
                }
            }

            button { r#type: "submit", "Log in" }
        }
    }
}
