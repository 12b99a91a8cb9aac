//! The upload page

use subgen_core::{OutputKind, SUPPORTED_CONTAINERS};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; color: #222; }
h1 { margin-bottom: 0.25rem; }
fieldset { border: none; padding: 0; margin: 1.5rem 0; }
label { display: block; margin: 0.35rem 0; }
button { font-size: 1rem; padding: 0.5rem 1.25rem; cursor: pointer; }
#busy { color: #555; }
#done { color: #1a7f37; }
#failure { color: #b42318; white-space: pre-wrap; }
footer { margin-top: 3rem; border-top: 1px solid #ddd; padding-top: 1rem; color: #666; font-size: 0.9rem; }
"#;

const SCRIPT: &str = r#"
var form = document.getElementById('generate');
var busy = document.getElementById('busy');
var submit = document.getElementById('submit');
var done = document.getElementById('done');
var failure = document.getElementById('failure');

form.addEventListener('submit', async function (ev) {
  ev.preventDefault();
  done.hidden = true;
  failure.hidden = true;

  if (!document.getElementById('video').files.length) {
    failure.textContent = 'Please upload a video file first.';
    failure.hidden = false;
    return;
  }

  var choice = form.querySelector('input[name="output"]:checked');
  busy.hidden = false;
  submit.disabled = true;
  try {
    var res = await fetch(form.action, { method: 'POST', body: new FormData(form) });
    if (res.ok) {
      var blob = await res.blob();
      var link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = choice.dataset.file;
      document.body.appendChild(link);
      link.click();
      link.remove();
      URL.revokeObjectURL(link.href);
      done.textContent = choice.dataset.done;
      done.hidden = false;
    } else {
      failure.textContent = await res.text();
      failure.hidden = false;
    }
  } catch (err) {
    failure.textContent = 'An error occurred: ' + err;
    failure.hidden = false;
  } finally {
    busy.hidden = true;
    submit.disabled = false;
  }
});
"#;

/// Render the single page: file picker, output preference, generate button.
pub fn render_index(transcriber: &str) -> String {
    let accept = SUPPORTED_CONTAINERS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let options = [OutputKind::Srt, OutputKind::EmbeddedVideo]
        .iter()
        .map(|kind| {
            format!(
                r#"<label><input type="radio" name="output" value="{value}" data-file="{file}" data-done="{done}"{checked}> {label}</label>"#,
                value = kind.as_str(),
                file = kind.file_name(),
                done = kind.done_message(),
                checked = if *kind == OutputKind::default() { " checked" } else { "" },
                label = kind.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Auto Subtitle Generator</title>
  <style>{STYLE}</style>
</head>
<body>
  <h1>&#127909; Auto Subtitle Generator</h1>
  <p>Upload a video to generate subtitles using Whisper. Download as an SRT file or get a video with embedded subtitles.</p>
  <form id="generate" method="post" action="/generate" enctype="multipart/form-data">
    <label for="video">Choose a video file ({types})</label>
    <input id="video" type="file" name="video" accept="{accept}">
    <fieldset>
      <legend>Output Preference</legend>
        {options}
    </fieldset>
    <button id="submit" type="submit">Generate Subtitles</button>
    <p id="busy" hidden>Processing video... This may take a few minutes.</p>
    <p id="done" hidden></p>
    <p id="failure" hidden></p>
  </form>
  <footer>Powered by {transcriber} and FFmpeg.</footer>
  <script>{SCRIPT}</script>
</body>
</html>
"#,
        types = SUPPORTED_CONTAINERS.join(", "),
    )
}
