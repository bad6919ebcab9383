use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// A bookable session on the landing page.
struct Package {
    name: &'static str,
    details: &'static str,
    price: u32,
}

const SERVICES: &[&str] = &[
    "Birthdays",
    "Special Occasions",
    "Weddings",
    "Newborns",
    "Engagements",
    "Graduations",
    "Housewarming Celebrations",
];

const PACKAGES: &[Package] = &[
    Package {
        name: "Starter Session",
        details: "1 hour · 10–15 edited photos",
        price: 150,
    },
    Package {
        name: "Standard Session",
        details: "2–3 hours · 25–45 edited photos",
        price: 250,
    },
    Package {
        name: "Premium Session",
        details: "5 hours · 60+ retouched photos",
        price: 1000,
    },
    Package {
        name: "Event Coverage",
        details: "Full-day coverage for weddings and events",
        price: 3000,
    },
];

/// Public landing page.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    phone: &'static str,
    instagram_handle: &'static str,
    instagram_url: &'static str,
    services: &'static [&'static str],
    packages: &'static [Package],
}

/// Handler for the landing page (GET /).
pub async fn index() -> impl IntoResponse {
    HtmlTemplate(IndexTemplate {
        phone: "332-201-7020",
        instagram_handle: "@roop_snap",
        instagram_url: "https://www.instagram.com/roop_snap",
        services: SERVICES,
        packages: PACKAGES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lists_every_package() {
        let html = IndexTemplate {
            phone: "332-201-7020",
            instagram_handle: "@roop_snap",
            instagram_url: "https://www.instagram.com/roop_snap",
            services: SERVICES,
            packages: PACKAGES,
        }
        .render()
        .unwrap();

        for package in PACKAGES {
            assert!(html.contains(package.name));
        }
        assert!(html.contains("$3000"));
        assert!(html.contains("Housewarming Celebrations"));
    }
}
