#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use site::config::AppConfig;
use site::state::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct RunningSite {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle.await.expect("join").expect("serve");
    }
}

/// Defaults from a config file that does not exist, rooted in `dir`.
pub fn base_config(dir: &Path) -> AppConfig {
    let mut cfg = AppConfig::load_from(Some(dir.join("config.toml")));
    cfg.log_dir = dir.join("logs");
    cfg.images_dir = dir.join("images");
    cfg.cloud_name = mocks::CLOUD.into();
    cfg
}

pub async fn start(cfg: AppConfig) -> RunningSite {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = AppState::new(cfg);
    let (shutdown, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(site::run(listener, state.clone(), async move {
        let _ = rx.await;
    }));
    RunningSite {
        addr,
        state,
        shutdown,
        handle,
    }
}
