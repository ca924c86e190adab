//! HTML templates for the web interface
//!
//! Simple inline HTML templates without a template engine. Every page is
//! built by [`page`], which renders the shared chrome: the one-shot flash
//! banner and the session footer.

use vellum::render::PageLayout;

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 800px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    .flash {
        color: #31708f;
        background: #d9edf7;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="password"],
    textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    textarea {
        font-family: monospace;
        resize: vertical;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 8px 16px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    ul.documents {
        list-style: none;
        padding: 0;
    }
    ul.documents li {
        padding: 8px;
        border-bottom: 1px solid #eee;
    }
    ul.documents a {
        color: #0066cc;
        text-decoration: none;
    }
    ul.documents a.edit {
        margin-left: 10px;
        color: #666;
        font-size: 13px;
    }
    ul.documents form {
        display: inline;
        margin-left: 10px;
    }
    ul.documents button {
        background: #999;
        padding: 2px 10px;
        font-size: 12px;
        font-weight: normal;
    }
    ul.documents button:hover {
        background: #d9534f;
    }
    .session {
        margin-top: 30px;
        padding-top: 15px;
        border-top: 1px solid #eee;
        color: #666;
    }
    .session form {
        display: inline;
    }
    .session a {
        color: #0066cc;
        font-weight: bold;
        text-decoration: none;
    }
"#;

/// Everything the chrome needs to know about the current request.
///
/// Also serves as the layout collaborator handed to the renderer, so
/// markdown document views get the same banner and footer as every other
/// page.
pub struct SiteChrome {
    title: String,
    flash: Option<String>,
    username: Option<String>,
}

impl SiteChrome {
    pub fn new(title: impl Into<String>, flash: Option<String>, username: Option<String>) -> Self {
        Self {
            title: title.into(),
            flash,
            username,
        }
    }
}

impl PageLayout for SiteChrome {
    fn wrap(&self, fragment: &str) -> String {
        page(
            &self.title,
            self.flash.as_deref(),
            self.username.as_deref(),
            fragment,
        )
    }
}

/// Render the document index
pub fn index_page(documents: &[String], flash: Option<&str>, username: Option<&str>) -> String {
    let listing = if documents.is_empty() {
        r#"<p style="color: #666; font-style: italic;">No documents yet.</p>"#.to_string()
    } else {
        let items: String = documents
            .iter()
            .map(|name| {
                let name = html_escape(name);
                format!(
                    r#"<li>
                    <a href="/{name}">{name}</a>
                    <a class="edit" href="/{name}/edit">edit</a>
                    <form method="POST" action="/{name}/delete">
                        <button type="submit">delete</button>
                    </form>
                </li>"#
                )
            })
            .collect();
        format!("<ul class=\"documents\">{items}</ul>")
    };

    let body = format!(
        r#"<h1>Documents</h1>
        {listing}
        <p><a href="/new">New Document</a></p>"#
    );

    page("Documents", flash, username, &body)
}

/// Render the new-document form
pub fn new_document_page(flash: Option<&str>, username: Option<&str>) -> String {
    let body = r#"<h1>New Document</h1>
        <form method="POST" action="/new">
            <div class="form-group">
                <label for="new_document">Add a new document:</label>
                <input type="text" id="new_document" name="new_document" autofocus>
            </div>
            <button type="submit">Create</button>
        </form>"#;

    page("New Document", flash, username, body)
}

/// Render the edit form for a document
pub fn edit_page(name: &str, content: &str, flash: Option<&str>, username: Option<&str>) -> String {
    let title = format!("Edit {name}");
    let name = html_escape(name);
    let content = html_escape(content);

    let body = format!(
        r#"<h1>Edit contents of {name}:</h1>
        <form method="POST" action="/{name}/edit">
            <div class="form-group">
                <textarea name="edit_contents" rows="20">{content}</textarea>
            </div>
            <button type="submit">Save Changes</button>
        </form>"#
    );

    page(&title, flash, username, &body)
}

/// Render the sign-in page
///
/// `username_value` carries the submitted username back into the form after
/// a failed attempt.
pub fn signin_page(flash: Option<&str>, username_value: Option<&str>) -> String {
    let value = username_value.map(html_escape).unwrap_or_default();

    let body = format!(
        r#"<h1>Sign In</h1>
        <form method="POST" action="/users/login">
            <div class="form-group">
                <label for="username">Username:</label>
                <input type="text" id="username" name="username" value="{value}" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password">
            </div>
            <button type="submit">Sign In</button>
        </form>"#
    );

    page("Sign In", flash, None, &body)
}

/// Shared page layout: flash banner, page body, session footer.
fn page(title: &str, flash: Option<&str>, username: Option<&str>, body: &str) -> String {
    let title = html_escape(title);

    let flash_html = flash.map_or(String::new(), |message| {
        format!(r#"<div class="flash">{}</div>"#, html_escape(message))
    });

    let session_html = match username {
        Some(user) => format!(
            r#"<div class="session">Signed in as {}.
            <form method="POST" action="/users/logout">
                <button type="submit">Sign Out</button>
            </form>
        </div>"#,
            html_escape(user)
        ),
        None => r#"<div class="session"><a href="/users/login">Sign In</a></div>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Vellum - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        {flash_html}
        {body}
        {session_html}
    </div>
</body>
</html>"#
    )
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
