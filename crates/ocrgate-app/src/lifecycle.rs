//! 라이프사이클 관리.
//!
//! 웹 서버 태스크 실행, OS 시그널 대기, graceful shutdown.

use std::future::Future;

use anyhow::{anyhow, Result};
use ocrgate_web::WebServer;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// 종료 수신기 생성
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// 서버를 실행하고 OS 시그널을 받으면 graceful shutdown
    pub async fn run(&self, server: WebServer) -> Result<()> {
        self.run_until(server, wait_for_signal()).await
    }

    /// 서버를 실행하고 `signal`이 끝나면 graceful shutdown
    ///
    /// 시그널 전에 서버가 끝나면 (바인드 실패 등) 그 에러를 반환한다.
    /// 시그널 핸들러 등록에 실패하면 서버가 스스로 끝나거나
    /// `shutdown()`이 호출될 때까지 계속 서비스한다.
    pub async fn run_until<S>(&self, server: WebServer, signal: S) -> Result<()>
    where
        S: Future<Output = std::io::Result<&'static str>>,
    {
        let mut server_task = tokio::spawn(server.run(self.subscribe()));

        tokio::select! {
            result = &mut server_task => {
                return flatten_server_result(result, "웹 서버 오류");
            }
            signal = signal => {
                match signal {
                    Ok(name) => info!(signal = name, "종료 시그널 수신"),
                    Err(e) => {
                        error!("시그널 핸들러 등록 실패, 서버 종료 시까지 계속 실행: {e}");
                        return flatten_server_result(server_task.await, "웹 서버 오류");
                    }
                }
            }
        }

        self.shutdown();
        flatten_server_result(server_task.await, "웹 서버 종료 중 오류")
    }
}

fn flatten_server_result(
    result: std::result::Result<std::io::Result<()>, JoinError>,
    context: &str,
) -> Result<()> {
    result
        .map_err(|e| anyhow!("서버 태스크 실패: {e}"))?
        .map_err(|e| anyhow!("{context}: {e}"))
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// OS 시그널 대기 (SIGINT, SIGTERM / Ctrl+C)
async fn wait_for_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => Ok("SIGINT"),
            _ = sigterm.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("Ctrl+C")
    }
}
