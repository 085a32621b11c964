use clap::Parser;
use partitioned_cache::config::NodeArgs;
use partitioned_cache::server::CacheNode;
use partitioned_cache::storage::service::NodeService;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = NodeArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    // 1. Cluster view. A bad index is fatal before anything is bound.
    let config = match args.cluster_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Starting node {} of {} ({})",
        config.node_index(),
        config.node_count(),
        config.local_endpoint()
    );
    for (i, node) in config.nodes().iter().enumerate() {
        tracing::info!("  - node {} client={} rpc+{}", i, node, config.rpc_port_offset());
    }

    // 2. Node service, router and both listeners:
    let node = CacheNode::new(config)?;
    let (client_listener, rpc_listener) = node.bind().await?;

    // 3. Spawn stats reporter:
    if args.stats_interval_secs > 0 {
        let service = node.service();
        let period = Duration::from_secs(args.stats_interval_secs);
        tokio::spawn(report_stats(service, period));
    }

    // 4. Serve until Ctrl+C:
    tracing::info!("Press Ctrl+C to shutdown");
    node.serve(client_listener, rpc_listener, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown requested");
    })
    .await?;

    Ok(())
}

async fn report_stats(service: Arc<NodeService>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let stats = service.stats();
        tracing::info!(
            "Node stats: node={} entries={}",
            stats.node_index,
            stats.entries
        );
    }
}
