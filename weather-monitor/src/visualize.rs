use std::path::Path;

use anyhow::{bail, Context, Result};
use plotlars::{Legend, Line, Plot, Rgb, Shape, Text, TimeSeriesPlot};
use polars::prelude::*;
use weather_store::{db, domain::format_date, DailySummary};

pub const AVG_SERIES: &str = "Average Temperature";
pub const MAX_SERIES: &str = "Max Temperature";
pub const MIN_SERIES: &str = "Min Temperature";

/// Reads every stored summary and plots the temperature history.
///
/// Opens its own connection to `db_path`, so it can run after the monitor's
/// store connection has been closed.
pub async fn plot_history<P: AsRef<Path>>(db_path: P) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let summaries = db::all_daily_summaries(&pool).await;
    pool.close().await;

    let frame = summaries_frame(&summaries?)?;
    tracing::info!(days = frame.height(), "plotting daily weather summary");
    plot_frame(&frame);
    Ok(())
}

/// One row per date with the three temperature series as columns.
pub fn summaries_frame(summaries: &[DailySummary]) -> Result<DataFrame> {
    if summaries.is_empty() {
        bail!("no daily summaries stored; nothing to plot");
    }

    let dates = summaries
        .iter()
        .map(|s| format_date(s.date))
        .collect::<Result<Vec<_>>>()?;
    let avg: Vec<f64> = summaries.iter().map(|s| s.avg_temp).collect();
    let max: Vec<f64> = summaries.iter().map(|s| s.max_temp).collect();
    let min: Vec<f64> = summaries.iter().map(|s| s.min_temp).collect();

    let frame = df!(
        "date" => dates,
        AVG_SERIES => avg,
        MAX_SERIES => max,
        MIN_SERIES => min,
    )
    .context("failed to build summary frame")?;

    Ok(frame)
}

fn plot_frame(frame: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(frame)
        .x("date")
        .y(AVG_SERIES)
        .additional_series(vec![MAX_SERIES, MIN_SERIES])
        .size(8)
        .colors(vec![Rgb(31, 119, 180), Rgb(214, 39, 40), Rgb(44, 160, 44)])
        .lines(vec![Line::Solid, Line::Solid, Line::Solid])
        .with_shape(true)
        .shapes(vec![Shape::Circle, Shape::Circle, Shape::Circle])
        .plot_title(Text::from("Daily Weather Summary").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("Date")
        .y_title("Temperature (°C)")
        .build()
        .plot();
}
