#[tokio::main]
async fn main() -> anyhow::Result<()> {
    travel_planner::cli::run().await
}
