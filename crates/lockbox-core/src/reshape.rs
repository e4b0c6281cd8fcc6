use crate::error::ProxyError;
use crate::types::{Method, NormalizedResult, RawRow};

/// Converts executor rows into the shape `method` asks for.
///
/// GET keeps only the first row (empty when there is none); every other
/// method projects the values of each row in order.
pub fn reshape(rows: Vec<RawRow>, method: Method) -> NormalizedResult {
    match method {
        Method::Get => NormalizedResult::Row(
            rows.into_iter()
                .next()
                .map(|row| row.values)
                .unwrap_or_default(),
        ),
        Method::Run | Method::All | Method::Values => {
            NormalizedResult::Rows(rows.into_iter().map(|row| row.values).collect())
        }
    }
}

/// Like [`reshape`], but rejects rows whose value count disagrees with
/// their column count.
pub fn reshape_checked(rows: Vec<RawRow>, method: Method) -> Result<NormalizedResult, ProxyError> {
    if let Some((idx, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.columns.len() != row.values.len())
    {
        return Err(ProxyError::ProtocolViolation(format!(
            "row {} has {} columns but {} values",
            idx,
            row.columns.len(),
            row.values.len()
        )));
    }
    Ok(reshape(rows, method))
}
