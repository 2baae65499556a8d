// SPDX-License-Identifier: MIT

//! Minimal server-rendered pages.
//!
//! Deliberately thin: page shells with inline forms, nothing more. A real
//! templating engine can be swapped in behind these functions without
//! touching the handlers. Everything user-controlled goes through
//! [`escape`].

use crate::models::Profile;

/// HTML-escape user-controlled text.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} — Reelroom</title></head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

fn flash_banner(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"flash\">{}</p>", escape(message)),
        None => String::new(),
    }
}

fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("<p class=\"error\">{}</p>", escape(message)),
        None => String::new(),
    }
}

/// Public landing page.
pub fn landing_page() -> String {
    page(
        "Welcome",
        "<h1>Reelroom</h1>\
         <p>Watch together. Match with people who share your taste.</p>\
         <nav><a href=\"/login\">Sign in</a> · <a href=\"/register\">Create an account</a></nav>",
    )
}

/// Main view for logged-in users: room actions and account link.
pub fn main_page(flash: Option<&str>) -> String {
    let body = format!(
        "{flash}\
         <h1>Your rooms</h1>\
         <form method=\"post\" action=\"/create-room\"><button type=\"submit\">Create a room</button></form>\
         <form method=\"post\" action=\"/quick-match\"><button type=\"submit\">Quick match</button></form>\
         <nav><a href=\"/account\">Account</a> · <a href=\"/logout\">Sign out</a></nav>",
        flash = flash_banner(flash),
    );
    page("Main", &body)
}

/// Login form, with an optional error and an optional flash message (e.g.
/// after registration with confirmation pending).
pub fn login_page(error: Option<&str>, flash: Option<&str>) -> String {
    let body = format!(
        "<h1>Sign in</h1>\
         {flash}{error}\
         <form method=\"post\" action=\"/login\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Sign in</button>\
         </form>\
         <p><a href=\"/register\">Create an account</a></p>",
        flash = flash_banner(flash),
        error = error_banner(error),
    );
    page("Sign in", &body)
}

/// Registration form.
pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Create an account</h1>\
         {error}\
         <form method=\"post\" action=\"/register\">\
         <label>Display name <input type=\"text\" name=\"displayName\" required></label>\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <label>Confirm password <input type=\"password\" name=\"confirm\" required></label>\
         <button type=\"submit\">Register</button>\
         </form>\
         <p><a href=\"/login\">Already have an account?</a></p>",
        error = error_banner(error),
    );
    page("Register", &body)
}

/// Account page: profile form prefilled with stored values.
pub fn account_page(profile: &Profile, saved: bool) -> String {
    let field = |value: &Option<String>| escape(value.as_deref().unwrap_or(""));

    let avatar = match profile.avatar_url.as_deref() {
        Some(url) if !url.is_empty() => {
            format!("<img src=\"{}\" alt=\"avatar\" width=\"96\">", escape(url))
        }
        _ => String::new(),
    };

    let body = format!(
        "{saved}\
         <h1>Your account</h1>\
         {avatar}\
         <form method=\"post\" action=\"/account\">\
         <label>Display name <input type=\"text\" name=\"displayName\" value=\"{display_name}\"></label>\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\
         <label>Handle <input type=\"text\" name=\"handle\" value=\"{handle}\"></label>\
         <label>Bio <textarea name=\"bio\">{bio}</textarea></label>\
         <label>Top 5 <textarea name=\"top5\">{top5}</textarea></label>\
         <button type=\"submit\">Save</button>\
         </form>\
         <form method=\"post\" action=\"/account/avatar\" enctype=\"multipart/form-data\">\
         <label>Avatar <input type=\"file\" name=\"avatar\" accept=\"image/*\"></label>\
         <button type=\"submit\">Upload</button>\
         </form>\
         <nav><a href=\"/pages/main\">Back</a></nav>",
        saved = flash_banner(saved.then_some("Saved.")),
        avatar = avatar,
        display_name = field(&profile.display_name),
        email = field(&profile.email),
        handle = field(&profile.handle),
        bio = field(&profile.bio),
        top5 = field(&profile.top5),
    );
    page("Account", &body)
}

/// Generic error page.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Sorry</h1>{}<p><a href=\"/pages/index\">Back to start</a></p>",
        error_banner(Some(message)),
    );
    page("Error", &body)
}
