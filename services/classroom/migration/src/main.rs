use sea_orm_migration::prelude::*;

use pagewise_classroom_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
