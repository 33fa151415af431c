use tracing::debug;

use crate::entities::drug::Drug;
use crate::error::DrugLabelError;
use crate::sources::openfda::{DrugLabelClient, validate_limit};

/// Fetches one drug per `(field, item)` pair, in input order.
///
/// Creates a client for `api_key` and delegates to [`make_drugs_with`].
pub async fn make_drugs<S: AsRef<str>>(
    api_key: &str,
    field_list: &[S],
    item_list: &[S],
    exact: bool,
    limit: usize,
) -> Result<Vec<Drug>, DrugLabelError> {
    let client = DrugLabelClient::new(api_key)?;
    make_drugs_with(&client, field_list, item_list, exact, limit).await
}

/// Like [`make_drugs`], against an already configured client.
///
/// The first failing item aborts the whole batch.
pub async fn make_drugs_with<S: AsRef<str>>(
    client: &DrugLabelClient,
    field_list: &[S],
    item_list: &[S],
    exact: bool,
    limit: usize,
) -> Result<Vec<Drug>, DrugLabelError> {
    if field_list.len() != item_list.len() {
        return Err(DrugLabelError::LengthMismatch {
            fields: field_list.len(),
            items: item_list.len(),
        });
    }
    validate_limit(limit)?;

    let mut drugs = Vec::with_capacity(field_list.len());
    for (field, item) in field_list.iter().zip(item_list) {
        let term = client.generic_search(field.as_ref(), item.as_ref(), exact)?;
        debug!(term = %term, "building drug from label search");
        let response = client.search_request(&[term], limit).await?;
        drugs.push(Drug::from_response(&response)?);
    }
    Ok(drugs)
}
