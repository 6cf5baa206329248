//! Consistency checks for a `Stack`.
//!
//! `Stack::check()` gathers every problem it finds instead of stopping at the first one, so a
//! single run reports the full list.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::service::{Lifecycle, Restart};
use crate::stack::Stack;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestIssue {
    /// Two services share a name.
    #[error("Service '{0}' is declared more than once")]
    DuplicateService(String),

    /// `depends_on` names a service that does not exist.
    #[error("Service '{service}' depends on undeclared service '{dependency}'")]
    UnknownDependency { service: String, dependency: String },

    /// The dependency graph contains a cycle through this service.
    #[error("Service '{0}' is part of a dependency cycle")]
    DependencyCycle(String),

    /// A mount references a volume missing from the top-level volume list.
    #[error("Service '{service}' mounts undeclared volume '{volume}'")]
    UnknownVolume { service: String, volume: String },

    /// A declared volume is not mounted anywhere.
    #[error("Volume '{0}' is declared but never mounted")]
    UnusedVolume(String),

    /// No service publishes a port, so nothing is reachable from outside.
    #[error("No service publishes a port")]
    NoEntryPoint,

    /// More than one service publishes ports.
    #[error("Only one service may publish ports, found: {0:?}")]
    MultipleEntryPoints(Vec<String>),

    /// The same host port is published twice.
    #[error("Host port {0} is published more than once")]
    DuplicateHostPort(u16),

    /// A stateful service does not keep its data directory on a named volume.
    #[error("Service '{service}' keeps state in '{data_dir}' without a named volume mounted there")]
    EphemeralData { service: String, data_dir: String },

    /// A one-shot service publishes ports.
    #[error("One-shot service '{0}' must not publish ports")]
    OneShotPublishesPorts(String),

    /// A one-shot service would be restarted after it finishes.
    #[error("One-shot service '{service}' has restart policy '{restart}'")]
    OneShotRestarts { service: String, restart: &'static str },
}

impl Stack {
    /// Validates the stack.
    ///
    /// # Returns
    /// - `Ok(())` - The stack is consistent
    /// - `Err(Vec<ManifestIssue>)` - Every problem found, in discovery order
    pub fn check(&self) -> Result<(), Vec<ManifestIssue>> {
        let mut issues = Vec::new();

        self.check_names(&mut issues);
        self.check_dependencies(&mut issues);
        self.check_volumes(&mut issues);
        self.check_entry_point(&mut issues);
        self.check_services(&mut issues);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn check_names(&self, issues: &mut Vec<ManifestIssue>) {
        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.name.as_str()) {
                issues.push(ManifestIssue::DuplicateService(service.name.clone()));
            }
        }
    }

    fn check_dependencies(&self, issues: &mut Vec<ManifestIssue>) {
        let declared: HashSet<&str> = self.services.iter().map(|s| s.name.as_str()).collect();

        for service in &self.services {
            for dependency in &service.depends_on {
                if !declared.contains(dependency.as_str()) {
                    issues.push(ManifestIssue::UnknownDependency {
                        service: service.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        let graph: HashMap<&str, Vec<&str>> = self
            .services
            .iter()
            .map(|s| {
                (
                    s.name.as_str(),
                    s.depends_on.iter().map(String::as_str).collect(),
                )
            })
            .collect();

        for service in &self.services {
            if reaches(&graph, &service.name, &service.name, &mut HashSet::new()) {
                issues.push(ManifestIssue::DependencyCycle(service.name.clone()));
            }
        }
    }

    fn check_volumes(&self, issues: &mut Vec<ManifestIssue>) {
        let mut used = HashSet::new();

        for service in &self.services {
            for volume in service.volumes() {
                if self.volumes.iter().any(|v| v == volume) {
                    used.insert(volume);
                } else {
                    issues.push(ManifestIssue::UnknownVolume {
                        service: service.name.clone(),
                        volume: volume.to_string(),
                    });
                }
            }
        }

        for volume in &self.volumes {
            if !used.contains(volume.as_str()) {
                issues.push(ManifestIssue::UnusedVolume(volume.clone()));
            }
        }
    }

    fn check_entry_point(&self, issues: &mut Vec<ManifestIssue>) {
        let publishers: Vec<String> = self
            .services
            .iter()
            .filter(|s| !s.ports.is_empty())
            .map(|s| s.name.clone())
            .collect();

        match publishers.len() {
            0 => issues.push(ManifestIssue::NoEntryPoint),
            1 => {}
            _ => issues.push(ManifestIssue::MultipleEntryPoints(publishers)),
        }

        let mut seen = HashSet::new();
        for (_, binding) in self.published_ports() {
            if !seen.insert(binding.host) {
                issues.push(ManifestIssue::DuplicateHostPort(binding.host));
            }
        }
    }

    fn check_services(&self, issues: &mut Vec<ManifestIssue>) {
        for service in &self.services {
            if let Some(data_dir) = &service.data_dir {
                let persisted = service
                    .mounts
                    .iter()
                    .any(|m| m.volume_name().is_some() && same_path(&m.target, data_dir));
                if !persisted {
                    issues.push(ManifestIssue::EphemeralData {
                        service: service.name.clone(),
                        data_dir: data_dir.clone(),
                    });
                }
            }

            if service.lifecycle == Lifecycle::OneShot {
                if !service.ports.is_empty() {
                    issues.push(ManifestIssue::OneShotPublishesPorts(service.name.clone()));
                }
                if let Some(restart) = service.restart.filter(Restart::restarts_on_success) {
                    issues.push(ManifestIssue::OneShotRestarts {
                        service: service.name.clone(),
                        restart: restart.as_str(),
                    });
                }
            }
        }
    }
}

/// Depth-first search for `target` among the dependencies of `from`.
fn reaches<'a>(
    graph: &HashMap<&'a str, Vec<&'a str>>,
    from: &'a str,
    target: &str,
    visited: &mut HashSet<&'a str>,
) -> bool {
    let Some(dependencies) = graph.get(from) else {
        return false;
    };

    for &dependency in dependencies {
        if dependency == target {
            return true;
        }
        if visited.insert(dependency) && reaches(graph, dependency, target, visited) {
            return true;
        }
    }

    false
}

fn same_path(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
