use thiserror::Error;

/// Failure of a single schedule fetch. The messages are shown to the user
/// as-is, so they carry the remedy as well as the cause.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(
        "Access Denied (Error 403). Please make sure your Google Sheet's sharing setting is \
         'Anyone with the link can view', or use the 'File > Share > Publish to web' option \
         for the most reliable results."
    )]
    AccessDenied,

    #[error(
        "The server responded with status {0}. Please ensure the URL is correct and the sheet \
         is publicly accessible."
    )]
    Status(u16),

    #[error(
        "Could not fetch data due to a network or CORS error. This can happen if the link is \
         incorrect or blocked. For Google Sheets, the most reliable method is to use the \
         'File > Share > Publish to web' feature and provide the generated CSV link."
    )]
    Network(#[source] reqwest::Error),
}

