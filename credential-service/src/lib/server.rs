use anyhow::Context;
use tokio::task::JoinHandle;

/// Wait on the HTTP and gRPC server tasks, returning as soon as either fails.
///
/// On failure the other task is aborted and the first error is returned, so the
/// process never keeps running with only one surface up.
pub async fn run_servers<HE, GE>(
    http_server: JoinHandle<Result<(), HE>>,
    grpc_server: JoinHandle<Result<(), GE>>,
) -> Result<(), anyhow::Error>
where
    HE: std::error::Error + Send + Sync + 'static,
    GE: std::error::Error + Send + Sync + 'static,
{
    let http_abort = http_server.abort_handle();
    let grpc_abort = grpc_server.abort_handle();

    let http = async {
        http_server
            .await
            .context("Http server task failed")?
            .context("Http server error")?;
        Ok::<(), anyhow::Error>(())
    };
    let grpc = async {
        grpc_server
            .await
            .context("gRpc server task failed")?
            .context("gRpc server error")?;
        Ok::<(), anyhow::Error>(())
    };

    if let Err(e) = tokio::try_join!(http, grpc) {
        http_abort.abort();
        grpc_abort.abort();
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_failed_server_is_reported_without_waiting_on_the_other() {
        let http = tokio::spawn(std::future::pending::<Result<(), io::Error>>());
        let grpc = tokio::spawn(async {
            Err::<(), _>(io::Error::new(io::ErrorKind::AddrInUse, "port 50051 taken"))
        });

        let result = tokio::time::timeout(Duration::from_secs(5), run_servers(http, grpc))
            .await
            .expect("returned only after the healthy server");

        let error = result.unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains("gRpc server error"));
        assert!(message.contains("port 50051 taken"));
    }

    #[tokio::test]
    async fn test_clean_exit_of_both_servers() {
        let http = tokio::spawn(async { Ok::<(), io::Error>(()) });
        let grpc = tokio::spawn(async { Ok::<(), io::Error>(()) });

        assert!(run_servers(http, grpc).await.is_ok());
    }

    #[tokio::test]
    async fn test_panicked_server_task_is_an_error() {
        let http = tokio::spawn(async {
            let fail = true;
            if fail {
                panic!("listener poisoned");
            }
            Ok::<(), io::Error>(())
        });
        let grpc = tokio::spawn(std::future::pending::<Result<(), io::Error>>());

        let result = tokio::time::timeout(Duration::from_secs(5), run_servers(http, grpc))
            .await
            .expect("returned only after the healthy server");

        assert!(format!("{:#}", result.unwrap_err()).contains("Http server task failed"));
    }
}
