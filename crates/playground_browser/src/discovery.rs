//! Model discovery from connection capabilities.

use playground_interface::{ConnectorApi, SessionCredentials};
use tracing::{debug, instrument, warn};

/// The operation verb that makes a model browsable.
pub const LIST_OPERATION: &str = "list";

/// Returns the models that support listing, in order of first appearance.
///
/// Operations are `model::verb` strings. Strings without the separator, and
/// verbs other than exactly `list`, are ignored.
///
/// # Examples
///
/// ```
/// use playground_browser::models_with_list_operations;
///
/// let operations = ["crmContact::list", "crmContact::update", "crmDeal::list"];
/// assert_eq!(models_with_list_operations(&operations), vec!["crmContact", "crmDeal"]);
/// ```
pub fn models_with_list_operations<S: AsRef<str>>(operations: &[S]) -> Vec<String> {
    let mut models: Vec<String> = Vec::new();
    for operation in operations {
        let Some((model, verb)) = operation.as_ref().split_once("::") else {
            continue;
        };
        if verb != LIST_OPERATION || model.is_empty() {
            continue;
        }
        if !models.iter().any(|m| m == model) {
            models.push(model.to_string());
        }
    }
    models
}

/// Fetches the connection's capabilities and returns its listable models.
///
/// Discovery fails closed: any error yields an empty list, which the
/// browser shows as "nothing to browse" rather than an error banner.
#[instrument(skip(api, credentials))]
pub async fn discover_models<A>(api: &A, credentials: &SessionCredentials) -> Vec<String>
where
    A: ConnectorApi + ?Sized,
{
    match api.list_capabilities(credentials).await {
        Ok(operations) => {
            let models = models_with_list_operations(&operations);
            debug!(
                operations = operations.len(),
                models = models.len(),
                "Discovered listable models"
            );
            models
        }
        Err(e) => {
            warn!(error = %e, "Capability listing failed, no models available");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_and_dedupes_preserving_order() {
        let operations = [
            "crmContact::list",
            "crmContact::update",
            "crmDeal::list",
            "crmContact::list",
            "crmAccount::get",
        ];
        assert_eq!(
            models_with_list_operations(&operations),
            vec!["crmContact", "crmDeal"]
        );
    }

    #[test]
    fn test_ignores_malformed_operations() {
        let operations = ["list", "crmContact:list", "crmContact::listAll", "::list", "crmLead::list"];
        assert_eq!(models_with_list_operations(&operations), vec!["crmLead"]);
    }

    #[test]
    fn test_no_list_operations() {
        let operations = ["crmContact::update"];
        assert!(models_with_list_operations(&operations).is_empty());
        assert!(models_with_list_operations::<&str>(&[]).is_empty());
    }
}
