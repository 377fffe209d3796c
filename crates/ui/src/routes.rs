use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{ExamView, LoginView, ResultsView, ScoreView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/exam", ExamView)] Exam {},
        #[route("/score", ScoreView)] Score {},
        #[route("/results", ResultsView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
