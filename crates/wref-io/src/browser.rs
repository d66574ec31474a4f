use anyhow::Context;
use tokio::process::Command;

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Hand `url` to the platform's default browser
pub async fn open_url(url: &str) -> anyhow::Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        anyhow::bail!("refusing to open non-web URL: {url}");
    }

    let status = opener(url)
        .status()
        .await
        .context("failed to launch the system URL opener")?;

    if !status.success() {
        anyhow::bail!("URL opener exited with {status}");
    }

    tracing::debug!("opened {url}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_web_urls() {
        let err = open_url("file:///etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("non-web URL"));
    }
}
