//! Host checks for the audio player

use tokio::process::Command;
use tracing::info;

/// Check that the configured audio player can be executed
pub async fn check_player_available(player: &str) -> Result<(), String> {
    let output = Command::new(player)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("{} is not available ({}). Alarms will be silent.", player, e))?;

    let version = String::from_utf8_lossy(&output.stdout);
    info!(
        "Audio player {} is available: {}",
        player,
        version.lines().next().unwrap_or("unknown version")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_player_is_reported() {
        let result = check_player_available("pomodesk-no-such-player").await;
        assert!(result.unwrap_err().contains("pomodesk-no-such-player"));
    }
}
