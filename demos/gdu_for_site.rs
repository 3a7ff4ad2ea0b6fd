use gdu_calculator::{GduCalculator, GduError, PipelineError, Selector};
use std::env;

#[tokio::main]
async fn main() -> Result<(), GduError> {
    env_logger::init();
    configure_polars_display();

    let calculator = GduCalculator::new().await?;
    println!("Loaded {} sites", calculator.sites().len());
    for region in calculator.regions() {
        println!("{}: {:?}", region, calculator.locations(region));
    }

    let mut args = env::args().skip(1);
    let (region, location, plot) = (args.next(), args.next(), args.next());

    let result = calculator
        .gdu()
        .maybe_region(region.as_deref())
        .maybe_location(location.as_deref())
        .maybe_plot(plot.as_deref())
        .call()
        .await;

    let table = match result {
        Ok(table) => table,
        Err(err @ PipelineError::EmptyResult { .. }) => {
            println!("{}", err);
            return Ok(());
        }
        Err(err) => {
            eprintln!("[{}] {}", err.stage(), err);
            return Err(err.into());
        }
    };

    println!("{:#?}", table.to_dataframe()?);
    println!("Total GDU: {}", table.total_gdu());

    if let (Some(region), Some(location), Some(plot)) = (region, location, plot) {
        let path = calculator.export_csv(&table, &Selector::new(region, location, plot))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn configure_polars_display() {
    // show every row of a season
    env::set_var("POLARS_FMT_MAX_ROWS", "200");
}
