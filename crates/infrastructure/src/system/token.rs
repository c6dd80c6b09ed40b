use regieleki_domain::DomainError;
use ring::rand::{SecureRandom, SystemRandom};
use std::path::Path;
use tokio::fs;
use tracing::info;

const TOKEN_BYTES: usize = 32;

/// Returns the API token stored at `path`, creating one if the file is
/// missing or empty.
///
/// New tokens are 32 random bytes, hex encoded, written with mode 0600.
pub async fn load_or_create_token(path: &Path) -> Result<String, DomainError> {
    if let Ok(content) = fs::read_to_string(path).await {
        let token = content.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    let token = generate_token()?;
    write_private(path, format!("{}\n", token).as_bytes()).await?;
    info!(path = %path.display(), "Generated new API token");
    Ok(token)
}

fn generate_token() -> Result<String, DomainError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| DomainError::IoError("Failed to generate API token".to_string()))?;
    Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
}

async fn write_private(path: &Path, content: &[u8]) -> Result<(), DomainError> {
    let write_err =
        |e: std::io::Error| DomainError::IoError(format!("Failed to write {}: {}", path.display(), e));

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.map_err(write_err)?;
    tokio::io::AsyncWriteExt::write_all(&mut file, content)
        .await
        .map_err(write_err)?;
    Ok(())
}
