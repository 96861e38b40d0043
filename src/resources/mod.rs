//! Asset loading for fonts and textures.
//!
//! A map build only names the assets it needs ([`AssetRequest`]); loading
//! happens separately and asynchronously so the scene can be shown before
//! text or textures are decoded. Natively assets are read from an asset
//! root directory, on the web they are fetched relative to the page origin.

use std::path::Path;

use futures::future::join_all;

pub mod texture;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Texture,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub path: String,
}

impl AssetRequest {
    pub fn font(path: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Font,
            path: path.into(),
        }
    }

    pub fn texture(path: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Texture,
            path: path.into(),
        }
    }
}

/// Outcome of one [`AssetRequest`].
#[derive(Debug)]
pub struct LoadedAsset {
    pub request: AssetRequest,
    pub bytes: anyhow::Result<Vec<u8>>,
}

#[cfg(target_arch = "wasm32")]
fn format_url(root: &Path, file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window available"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("failed to read page origin: {e:?}"))?;
    let base = reqwest::Url::parse(&format!("{}/{}/", origin, root.display()))?;
    Ok(base.join(file_name)?)
}

/// Fails for HTTP client and server errors so an error page is never taken for
/// the asset itself.
pub fn check_http_status(url: &str, status: u16) -> anyhow::Result<()> {
    if (400..600).contains(&status) {
        anyhow::bail!("failed to fetch asset {url}: HTTP {status}");
    }
    Ok(())
}

pub async fn load_binary(root: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(root, file_name)?;
        let response = reqwest::get(url.clone()).await?;
        check_http_status(url.as_str(), response.status().as_u16())?;
        response.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        use anyhow::Context;
        let path = root.join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read asset {}", path.display()))?
    };

    Ok(data)
}

/// Loads all requests concurrently. Failures are logged and reported per request.
pub async fn load_assets(root: &Path, requests: &[AssetRequest]) -> Vec<LoadedAsset> {
    join_all(requests.iter().map(|request| async move {
        let bytes = load_binary(root, &request.path).await;
        match &bytes {
            Ok(data) => log::info!("loaded {:?} {} ({} bytes)", request.kind, request.path, data.len()),
            Err(e) => log::warn!("failed to load {:?} {}: {e:#}", request.kind, request.path),
        }
        LoadedAsset {
            request: request.clone(),
            bytes,
        }
    }))
    .await
}
