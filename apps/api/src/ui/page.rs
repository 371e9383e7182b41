//! The single HTML page: one text area, one button, and (after an action)
//! either the generated letter with its download link or an error message.

/// Everything the page shows for one response.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Echoed back so a failed action can be retried without re-pasting.
    pub job_requirements: &'a str,
    pub letter: Option<&'a str>,
    pub error: Option<String>,
    pub max_chars: usize,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Cover Letter Generator</title>
<style>
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #222; }
main { max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; height: 300px; font: inherit; padding: .5rem; box-sizing: border-box; }
button { margin-top: .75rem; padding: .5rem 1.25rem; font: inherit; cursor: pointer; }
button[disabled] { cursor: progress; opacity: .6; }
.error { background: #fdecea; border: 1px solid #f5c2bd; padding: .75rem 1rem; border-radius: 4px; }
.letter { white-space: pre-wrap; background: #fff; border: 1px solid #ddd; padding: 1rem; font-family: inherit; }
</style>
</head>
<body>
<main>
<h1>Cover Letter Generator</h1>
"#;

const SCRIPT: &str = r#"<script>
document.getElementById("generate-form").addEventListener("submit", function () {
  document.getElementById("generate-button").disabled = true;
  document.getElementById("spinner").hidden = false;
});
</script>
"#;

const FOOT: &str = "</main>\n</body>\n</html>\n";

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096 + view.job_requirements.len());
    html.push_str(HEAD);

    if let Some(error) = &view.error {
        html.push_str(r#"<p class="error" role="alert">"#);
        html.push_str(&escape_html(error));
        html.push_str("</p>\n");
    }

    html.push_str(r#"<form method="post" action="/generate" id="generate-form">"#);
    html.push('\n');
    html.push_str(r#"<label for="job_requirements">Paste the job requirements here:</label>"#);
    html.push('\n');
    html.push_str(&format!(
        r#"<textarea id="job_requirements" name="job_requirements" maxlength="{}">"#,
        view.max_chars
    ));
    html.push_str(&escape_html(view.job_requirements));
    html.push_str("</textarea>\n");
    html.push_str(r#"<button type="submit" id="generate-button">Generate Cover Letter</button>"#);
    html.push('\n');
    html.push_str(r#"<p id="spinner" hidden>Generating cover letter...</p>"#);
    html.push_str("\n</form>\n");

    if let Some(letter) = view.letter {
        html.push_str("<h2>Generated Cover Letter</h2>\n");
        html.push_str(r#"<pre class="letter">"#);
        html.push_str(&escape_html(letter));
        html.push_str("</pre>\n");
        html.push_str(
            r#"<p><a href="/download" download="cover_letter.pdf">Download Cover Letter as PDF</a></p>"#,
        );
        html.push('\n');
    }

    html.push_str(SCRIPT);
    html.push_str(FOOT);
    html
}

/// Minimal escaping for text placed in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
