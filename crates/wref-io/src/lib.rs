pub mod browser;
pub mod clipboard;

use wref_types::Action;

/// Execute a display item action on the local desktop
pub async fn perform(action: &Action) -> anyhow::Result<()> {
    match action {
        Action::CopyToClipboard(text) => clipboard::copy_text(text.clone()).await,
        Action::OpenInBrowser(url) => browser::open_url(url).await,
    }
}
