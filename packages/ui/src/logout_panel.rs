use dioxus::prelude::*;
use store::UserRecord;

use crate::controller::Msg;
use crate::icons::FaRightFromBracket;
use crate::Icon;

/// Shown in the identified flow: who is logged in, and a way out.
#[component]
pub fn LogoutPanel(user: UserRecord) -> Element {
    let router = use_coroutine_handle::<Msg>();

    rsx! {
        div {
            id: "logout-panel",
            class: "logout-panel",
            span { class: "logout-panel-name", "Logged in as {user.name}" }
            button {
                class: "logout-panel-button",
                title: "Log out",
                onclick: move |_| router.send(Msg::Logout),
                Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                " Log out"
            }
        }
    }
}
