//! The single HTML page of the web shell

use crate::settings::Settings;
use crate::web::render::escape_html;

const STYLE: &str = r#"
    body { margin: 0; background: #fafafa; color: #262730; }
    .app { max-width: 1800px; margin: 0 auto; font-family: Arial, sans-serif; display: flex; min-height: 100vh; }
    aside { width: 300px; background-color: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
    main { flex: 1; padding: 2rem 3rem; }
    label { display: block; margin: 1rem 0 .4rem; }
    input[type=text], select { width: 100%; padding: .5rem; box-sizing: border-box; background-color: #ffffff; border: 1px solid #ccc; border-radius: 4px; }
    button { margin-top: 1rem; background-color: #4CAF50; color: white; font-weight: bold; border: none; padding: .6rem 1.2rem; border-radius: 4px; cursor: pointer; }
    button:disabled { opacity: .6; cursor: progress; }
    .notice { padding: .75rem; border-radius: 4px; margin-top: 1rem; }
    .success { background: #dff0d8; color: #1e5631; }
    .info { background: #dbeafe; color: #1e3a8a; }
    .warning { background: #fff4ce; color: #7a5b00; }
    .error { background: #fde2e1; color: #8a1c1c; }
    .hidden { display: none; }
    #result { margin-top: 2rem; line-height: 1.5; }
"#;

const SCRIPT: &str = r#"
    const button = document.getElementById('generate');
    const busy = document.getElementById('busy');
    const message = document.getElementById('message');
    const result = document.getElementById('result');

    function show(kind, text) {
      message.className = 'notice ' + kind;
      message.textContent = text;
    }

    button.addEventListener('click', async () => {
      const topic = document.getElementById('topic').value;
      const model = document.getElementById('model').value;
      message.className = 'hidden';
      result.innerHTML = '';
      button.disabled = true;
      busy.classList.remove('hidden');
      try {
        const response = await fetch('/api/generate', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ topic, model }),
        });
        const body = await response.json();
        if (response.ok) {
          result.innerHTML = body.html;
        } else if (body.kind === 'validation') {
          show('warning', body.error);
        } else {
          show('error', body.error);
        }
      } catch (err) {
        show('error', 'Request failed: ' + err);
      } finally {
        button.disabled = false;
        busy.classList.add('hidden');
      }
    });
"#;

/// Render the page for the current settings
pub fn index_page(settings: &Settings) -> String {
    let title = escape_html(&settings.title);
    let default_model = settings.default_model();

    let options: String = settings
        .models
        .iter()
        .map(|model| {
            let selected = if model == default_model { " selected" } else { "" };
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                escape_html(model),
                selected
            )
        })
        .collect();

    let credential_notice = if settings.has_credential() {
        r#"<div class="notice success">API Key and Model set successfully!</div>"#
    } else {
        r#"<div class="notice info">Please set the OPENROUTER_API_KEY environment variable to proceed.</div>"#
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
<div class="app">
  <aside>
    <h2>Configuration</h2>
    <label for="model">Select OpenRouter model:</label>
    <select id="model">{options}</select>
    {credential_notice}
  </aside>
  <main>
    <h1>📝 {title}</h1>
    <p>Generate detailed articles on any topic using AI agents!</p>
    <label for="topic">Enter the topic for the article:</label>
    <input id="topic" type="text" placeholder="e.g., The Impact of Artificial Intelligence on Healthcare">
    <button id="generate">Generate Article</button>
    <div id="busy" class="notice info hidden">🤖 AI agents are working on your article...</div>
    <div id="message" class="hidden"></div>
    <article id="result"></article>
  </main>
</div>
<script>{SCRIPT}</script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_models_with_default_selected() {
        let page = index_page(&Settings::default());
        assert!(page.contains(
            r#"<option value="google/gemini-2.0-pro-exp-02-05:free" selected>"#
        ));
        assert!(page.contains(r#"<option value="mistralai/mistral-medium">"#));
        assert!(page.contains("Generate Article"));
    }

    #[test]
    fn test_credential_notice() {
        let missing = index_page(&Settings::default());
        assert!(missing.contains("Please set the OPENROUTER_API_KEY"));

        let present = index_page(&Settings::default().with_api_key("key"));
        assert!(present.contains("API Key and Model set successfully!"));
    }
}
