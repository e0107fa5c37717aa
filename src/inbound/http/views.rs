//! View rendering: pure functions from data to markup.
//!
//! No template engine; every page is a function of its inputs and nothing
//! else. All interpolated user data goes through [`escape`].

use crate::domain::{FoodItem, Principal, User, UserId};

/// Escape text for interpolation into HTML body or attribute positions.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Canonical list path for an owner's pantry.
pub fn foods_path(owner: &UserId) -> String {
    format!("/users/{owner}/foods")
}

fn item_path(owner: &UserId, item: &FoodItem) -> String {
    format!("/users/{owner}/foods/{}", item.id())
}

fn nav(principal: Option<&Principal>) -> String {
    match principal {
        Some(principal) => format!(
            concat!(
                "<nav><a href=\"/\">Home</a> ",
                "<a href=\"{foods}\">My pantry</a> ",
                "<a href=\"/users\">Community</a> ",
                "<span>Signed in as {name}</span> ",
                "<a href=\"/auth/sign-out\">Sign out</a></nav>"
            ),
            foods = foods_path(principal.id()),
            name = escape(principal.username().as_ref()),
        ),
        None => concat!(
            "<nav><a href=\"/\">Home</a> ",
            "<a href=\"/auth/sign-in\">Sign in</a> ",
            "<a href=\"/auth/sign-up\">Sign up</a></nav>"
        )
        .to_owned(),
    }
}

fn layout(title: &str, principal: Option<&Principal>, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html><head><title>{title}</title></head><body>",
            "{nav}<main>{body}</main></body></html>"
        ),
        title = escape(title),
        nav = nav(principal),
        body = body,
    )
}

pub fn landing_page(principal: Option<&Principal>) -> String {
    let body = match principal {
        Some(principal) => format!(
            "<h1>Pantry</h1><p>Welcome back, {}.</p>",
            escape(principal.username().as_ref())
        ),
        None => "<h1>Pantry</h1><p>Sign in to manage your pantry.</p>".to_owned(),
    };
    layout("Pantry", principal, &body)
}

fn form_error(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"error\">{}</p>", escape(message)),
        None => String::new(),
    }
}

pub fn sign_up_page(error: Option<&str>) -> String {
    let body = format!(
        concat!(
            "<h1>Sign up</h1>{error}",
            "<form method=\"POST\" action=\"/auth/sign-up\">",
            "<label>Username <input name=\"username\"></label>",
            "<label>Password <input name=\"password\" type=\"password\"></label>",
            "<label>Confirm password ",
            "<input name=\"confirm_password\" type=\"password\"></label>",
            "<button type=\"submit\">Sign up</button></form>"
        ),
        error = form_error(error),
    );
    layout("Sign up", None, &body)
}

pub fn sign_in_page(error: Option<&str>) -> String {
    let body = format!(
        concat!(
            "<h1>Sign in</h1>{error}",
            "<form method=\"POST\" action=\"/auth/sign-in\">",
            "<label>Username <input name=\"username\"></label>",
            "<label>Password <input name=\"password\" type=\"password\"></label>",
            "<button type=\"submit\">Sign in</button></form>"
        ),
        error = form_error(error),
    );
    layout("Sign in", None, &body)
}

fn item_rows(owner: &UserId, items: &[FoodItem]) -> String {
    items
        .iter()
        .map(|item| {
            let path = item_path(owner, item);
            format!(
                concat!(
                    "<li>{name} ",
                    "<a href=\"{path}/edit\">Edit</a> ",
                    "<form method=\"POST\" action=\"{path}?_method=DELETE\">",
                    "<button type=\"submit\">Delete</button></form></li>"
                ),
                name = escape(item.name()),
                path = path,
            )
        })
        .collect()
}

pub fn pantry_index_page(principal: &Principal, items: &[FoodItem]) -> String {
    let body = format!(
        concat!(
            "<h1>Your pantry</h1>",
            "<ul>{rows}</ul>",
            "<a href=\"{foods}/new\">Add a food</a>"
        ),
        rows = item_rows(principal.id(), items),
        foods = foods_path(principal.id()),
    );
    layout("Your pantry", Some(principal), &body)
}

pub fn food_new_page(principal: &Principal) -> String {
    let body = format!(
        concat!(
            "<h1>Add a food</h1>",
            "<form method=\"POST\" action=\"{foods}\">",
            "<label>Name <input name=\"name\"></label>",
            "<button type=\"submit\">Add</button></form>"
        ),
        foods = foods_path(principal.id()),
    );
    layout("Add a food", Some(principal), &body)
}

pub fn food_edit_page(principal: &Principal, item: &FoodItem) -> String {
    let body = format!(
        concat!(
            "<h1>Edit food</h1>",
            "<form method=\"POST\" action=\"{path}?_method=PUT\">",
            "<label>Name <input name=\"name\" value=\"{name}\"></label>",
            "<button type=\"submit\">Save</button></form>"
        ),
        path = item_path(principal.id(), item),
        name = escape(item.name()),
    );
    layout("Edit food", Some(principal), &body)
}

pub fn community_index_page(principal: &Principal, users: &[User]) -> String {
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                "<li><a href=\"/users/{id}\">{name}</a></li>",
                id = user.id(),
                name = escape(user.username().as_ref()),
            )
        })
        .collect();
    let body = format!("<h1>Community</h1><ul>{rows}</ul>");
    layout("Community", Some(principal), &body)
}

pub fn community_show_page(principal: &Principal, user: &User) -> String {
    let rows: String = user
        .pantry()
        .items()
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item.name())))
        .collect();
    let body = format!(
        "<h1>{name}&#39;s pantry</h1><ul>{rows}</ul>",
        name = escape(user.username().as_ref()),
    );
    layout("Pantry", Some(principal), &body)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::pantry::{FoodDraft, Pantry};
    use crate::domain::{PasswordHash, Username};

    fn principal() -> Principal {
        Principal::new(
            UserId::random(),
            Username::new("ada").expect("valid username"),
        )
    }

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape("<b>\"a&b\"</b>"),
            "&lt;b&gt;&quot;a&amp;b&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn pantry_page_lists_items_with_delete_overrides() {
        let principal = principal();
        let mut pantry = Pantry::new();
        pantry.append(FoodDraft {
            name: "Milk".to_owned(),
        });

        let html = pantry_index_page(&principal, pantry.items());
        assert!(html.contains("Milk"));
        assert!(html.contains("?_method=DELETE"));
        assert!(html.contains(&format!("/users/{}/foods/new", principal.id())));
    }

    #[test]
    fn edit_page_prefills_and_escapes_the_name() {
        let principal = principal();
        let mut pantry = Pantry::new();
        let id = pantry.append(FoodDraft {
            name: "\"Oat\" Milk".to_owned(),
        });
        let item = pantry.get(&id).expect("item present");

        let html = food_edit_page(&principal, item);
        assert!(html.contains("value=\"&quot;Oat&quot; Milk\""));
        assert!(html.contains("?_method=PUT"));
    }

    #[test]
    fn nav_reflects_the_session_state() {
        let signed_out = landing_page(None);
        assert!(signed_out.contains("/auth/sign-in"));
        assert!(!signed_out.contains("Sign out"));

        let principal = principal();
        let signed_in = landing_page(Some(&principal));
        assert!(signed_in.contains("Sign out"));
        assert!(signed_in.contains("ada"));
    }

    #[test]
    fn community_page_links_each_user() {
        let principal = principal();
        let user = User::new(
            UserId::random(),
            Username::new("grace").expect("valid username"),
            PasswordHash::digest_of("pw"),
        );
        let html = community_index_page(&principal, std::slice::from_ref(&user));
        assert!(html.contains(&format!("/users/{}", user.id())));
        assert!(html.contains("grace"));
    }
}
