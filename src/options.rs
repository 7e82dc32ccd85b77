use anyhow::Result;
use log::info;

use crate::{
    acquire::Controller,
    cli::OptionsArgs,
    filter::{Category, FilterOptions},
    output,
    session::Session,
    table,
    view::{self, Loaded},
};

pub async fn execute(args: &OptionsArgs) -> Result<()> {
    let mut controller = Controller::new(view::http_client()?);
    let mut session = Session::starting_today();

    let dataset = match view::load(&mut session, &mut controller, &args.source.url).await? {
        Loaded::Idle => return output::write_text(std::io::stdout(), view::INSTRUCTIONS),
        Loaded::Ready { dataset, .. } => dataset,
    };
    controller.stop_polling();

    let options = FilterOptions::from_rows(&dataset.rows);
    if args.json {
        return output::write_json(std::io::stdout(), &options);
    }

    let headers = vec!["filter".to_string(), "value".to_string()];
    let rows = Category::ALL
        .iter()
        .flat_map(|&category| {
            options
                .get(category)
                .iter()
                .map(move |value| vec![category.label().to_string(), value.clone()])
        })
        .collect::<Vec<_>>();
    output::write_text(std::io::stdout(), &table::render_table(&headers, &rows))?;
    info!(
        "Listed {} filter value(s) from {} row(s)",
        rows.len(),
        dataset.len()
    );
    Ok(())
}
