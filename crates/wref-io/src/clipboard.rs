use arboard::Clipboard;

/// Put `text` on the system clipboard.
///
/// arboard talks to the platform clipboard synchronously, so the call runs on
/// the blocking pool.
pub async fn copy_text(text: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok::<_, anyhow::Error>(())
    })
    .await??;

    tracing::debug!("copied text to clipboard");
    Ok(())
}
