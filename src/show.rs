use anyhow::Result;
use log::info;

use crate::{
    acquire::Controller,
    cli::ShowArgs,
    output,
    session::Session,
    view::{self, Loaded},
};

pub async fn execute(args: &ShowArgs) -> Result<()> {
    let mut controller = Controller::new(view::http_client()?);
    let mut session = Session::new(args.view.start_date());

    let (dataset, last_updated) =
        match view::load(&mut session, &mut controller, &args.source.url).await? {
            Loaded::Idle => {
                return output::write_text(std::io::stdout(), view::INSTRUCTIONS);
            }
            Loaded::Ready {
                dataset,
                last_updated,
            } => (dataset, last_updated),
        };
    controller.stop_polling();

    *session.selection_mut() = args.filters.selection();
    view::render(&mut session, &dataset, last_updated, &args.view)?;
    info!(
        "Displayed {} of {} row(s) for {}",
        session.visible_rows(&dataset).len(),
        dataset.len(),
        session.heading()
    );
    Ok(())
}
