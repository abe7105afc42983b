use maud::{html, Markup};

use crate::templates::layouts::{base::base, PageConfig};

pub fn home_page(api_base: &str, routes: &[(&str, &str)]) -> Markup {
    let config = PageConfig {
        title: "SurfsUp Weather API",
        api_base,
    };

    base(&config, content(routes))
}

fn content(routes: &[(&str, &str)]) -> Markup {
    html! {
        h1 class="title is-4" { "Welcome to a Hawaii weather API!" }
        h2 class="subtitle is-5" { "Available Routes include:" }
        table class="table is-fullwidth is-striped" {
            thead {
                tr {
                    th { "Route" }
                    th { "Returns" }
                }
            }
            tbody {
                @for (path, description) in routes {
                    tr {
                        td { code { (path) } }
                        td { (description) }
                    }
                }
            }
        }
        p class="help" {
            "Dates use the YYYY-MM-DD format, for example "
            code { "/api/v1.0/2017-01-01/2017-01-07" }
            "."
        }
    }
}
