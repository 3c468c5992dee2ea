//! Sequential deletion of matched versions.
//!
//! Every matched version ends in exactly one [`DeletionOutcome`]. Failures
//! are logged and recorded as they happen; they never stop the batch.

use log::{error, info};

use crate::filter::MatchedVersion;
use crate::http::ApiError;
use crate::registry::PackageRegistry;

/// Message the registry returns when asked to delete a package's only
/// remaining version.
pub const LAST_VERSION_MESSAGE: &str =
    "You cannot delete the last version of a package. You must delete the package instead.";

/// Whether a failed version delete was refused because it is the package's
/// last version, in which case the whole package has to be deleted instead.
pub fn is_last_version_refusal(message: &str) -> bool {
    message == LAST_VERSION_MESSAGE
}

/// Terminal state of one matched version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    DeletedVersion,
    /// The version was the last one, so its package was deleted.
    DeletedPackage,
    Failed(String),
}

impl DeletionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DeletionOutcome::Failed(_))
    }
}

/// Outcomes of one deletion batch, in processing order.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub outcomes: Vec<(MatchedVersion, DeletionOutcome)>,
}

impl DeletionReport {
    /// True if any version ended in [`DeletionOutcome::Failed`].
    pub fn encountered_error(&self) -> bool {
        self.outcomes.iter().any(|(_, o)| o.is_failure())
    }

    pub fn deleted_versions(&self) -> usize {
        self.count(|o| *o == DeletionOutcome::DeletedVersion)
    }

    pub fn deleted_packages(&self) -> usize {
        self.count(|o| *o == DeletionOutcome::DeletedPackage)
    }

    pub fn failures(&self) -> usize {
        self.count(DeletionOutcome::is_failure)
    }

    fn count(&self, pred: impl Fn(&DeletionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Deletes matched versions of packages owned by one organization.
pub struct DeletionExecutor<'a, P: PackageRegistry> {
    registry: &'a P,
    org: &'a str,
    package_type: &'a str,
}

impl<'a, P: PackageRegistry> DeletionExecutor<'a, P> {
    pub fn new(registry: &'a P, org: &'a str, package_type: &'a str) -> Self {
        Self {
            registry,
            org,
            package_type,
        }
    }

    /// Process every version in order, one request at a time.
    pub async fn run(&self, versions: Vec<MatchedVersion>) -> DeletionReport {
        let mut report = DeletionReport::default();
        for version in versions {
            let outcome = self.delete(&version).await;
            report.outcomes.push((version, outcome));
        }
        report
    }

    /// Drive one version to its terminal outcome.
    pub async fn delete(&self, v: &MatchedVersion) -> DeletionOutcome {
        info!(
            "Deleting Name: {} Version: {} Id: {}",
            v.package_name, v.version_label, v.id
        );

        let err = match self
            .registry
            .delete_version(self.org, self.package_type, &v.package_name, v.id)
            .await
        {
            Ok(()) => return DeletionOutcome::DeletedVersion,
            Err(e) => e,
        };

        // The full cause chain, so transport failures keep their source.
        let message = format!("{:#}", err);
        error!(
            "Error while trying to delete Name: {} Version: {} Id: {}: {}",
            v.package_name, v.version_label, v.id, message
        );
        let refused = match err.downcast_ref::<ApiError>() {
            Some(api) => is_last_version_refusal(&api.message),
            None => is_last_version_refusal(&err.to_string()),
        };
        if !refused {
            return DeletionOutcome::Failed(message);
        }

        info!(
            "Deleting package {} instead of just the last version",
            v.package_name
        );
        match self
            .registry
            .delete_package(self.org, self.package_type, &v.package_name)
            .await
        {
            Ok(()) => {
                info!(
                    "Deleted package Name: {} (last version: {} Id: {})",
                    v.package_name, v.version_label, v.id
                );
                DeletionOutcome::DeletedPackage
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!(
                    "Error while trying to delete package Name: {} Version: {} Id: {}: {}",
                    v.package_name, v.version_label, v.id, message
                );
                DeletionOutcome::Failed(message)
            }
        }
    }
}
