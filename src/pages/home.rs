//! Home Page

use crate::api::client::{self, FetchError};
use crate::dom;

pub async fn init() -> Result<(), FetchError> {
    let me = client::fetch_me().await?;
    dom::bind_text("#who", Some(&me.who));
    Ok(())
}
