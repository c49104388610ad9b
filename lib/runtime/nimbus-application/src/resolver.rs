//! Configuration resolution: raw scrape configuration to resolved execution model.
//!
//! Validation stops at the first violation. Order: discovery jobs, exported tag
//! keys, custom namespace jobs, static jobs, then the version marker.

use regex::Regex;
use tracing::{info, warn};

use nimbus_domain::{
    API_VERSION, CustomNamespaceJob, CustomNamespaceJobSpec, DimensionsRegexp, DiscoveryJob,
    DiscoveryJobSpec, JobsConfig, MetricConfig, MetricSpec, Role, ScrapeConfig, SearchTag,
    ServiceDescriptor, StaticJob, StaticJobSpec,
};
use nimbus_ports::ServiceRegistry;

use crate::cascade::Cascade;
use crate::error::{AliasSite, ConfigError, JobCategory, JobRef, MetricRef};
use crate::warning::ConfigWarning;

/// A resolved model together with the warnings raised while producing it.
#[derive(Debug)]
pub struct Resolution {
    pub jobs: JobsConfig,
    pub warnings: Vec<ConfigWarning>,
}

pub fn resolve(
    config: &ScrapeConfig,
    registry: &dyn ServiceRegistry,
) -> Result<Resolution, ConfigError> {
    Resolver::new(registry).resolve(config)
}

pub struct Resolver<'a> {
    registry: &'a dyn ServiceRegistry,
    warnings: Vec<ConfigWarning>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a dyn ServiceRegistry) -> Self {
        Self {
            registry,
            warnings: Vec::new(),
        }
    }

    pub fn resolve(mut self, config: &ScrapeConfig) -> Result<Resolution, ConfigError> {
        if !config.has_jobs() {
            return Err(ConfigError::EmptyConfiguration);
        }

        let discovery_jobs = config
            .discovery
            .jobs
            .iter()
            .enumerate()
            .map(|(index, job)| self.discovery_job(index, job, config))
            .collect::<Result<Vec<_>, _>>()?;

        self.check_exported_tags(config)?;

        let custom_namespace_jobs = config
            .custom_namespace_jobs
            .iter()
            .enumerate()
            .map(|(index, job)| self.custom_namespace_job(index, job))
            .collect::<Result<Vec<_>, _>>()?;

        let static_jobs = config
            .static_jobs
            .iter()
            .enumerate()
            .map(|(index, job)| self.static_job(index, job))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(version) = config.api_version.as_deref() {
            if !version.is_empty() && version != API_VERSION {
                return Err(ConfigError::UnsupportedVersion {
                    version: version.to_string(),
                });
            }
        }

        let jobs = JobsConfig {
            sts_region: config.sts_region.clone(),
            discovery_jobs,
            static_jobs,
            custom_namespace_jobs,
        };
        info!(
            target: "config",
            jobs = jobs.job_count(),
            metrics = jobs.metric_count(),
            warnings = self.warnings.len(),
            "configuration resolved"
        );
        Ok(Resolution {
            jobs,
            warnings: self.warnings,
        })
    }

    fn discovery_job(
        &mut self,
        index: usize,
        spec: &DiscoveryJobSpec,
        config: &ScrapeConfig,
    ) -> Result<DiscoveryJob, ConfigError> {
        let job = JobRef::new(JobCategory::Discovery, index);
        if spec.job_type.is_empty() {
            return Err(ConfigError::EmptyType { job });
        }
        let Some(service) =
            self.canonical_service(&spec.job_type, || AliasSite::Job(job.clone()))?
        else {
            return Err(ConfigError::UnknownServiceType {
                job,
                service: spec.job_type.clone(),
            });
        };
        let job = job.labelled(&spec.job_type);

        check_roles(&job, &spec.roles)?;
        if spec.regions.is_empty() {
            return Err(ConfigError::EmptyRegions { job });
        }
        if spec.metrics.is_empty() {
            return Err(ConfigError::EmptyMetrics { job });
        }
        let defaults = spec.defaults();
        let metrics = self.metrics(&job, &spec.metrics, Cascade::with_job(&defaults))?;
        let search_tags = spec
            .search_tags
            .iter()
            .map(|tag| {
                Regex::new(&tag.value)
                    .map(|value| SearchTag {
                        key: tag.key.clone(),
                        value,
                    })
                    .map_err(|source| ConfigError::InvalidSearchTagRegex {
                        job: job.clone(),
                        key: tag.key.clone(),
                        pattern: tag.value.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if spec.rounding_period.is_some() {
            self.warn(ConfigWarning::RoundingPeriodDeprecated { job: job.clone() });
        }
        let dimensions_regexps = dimensions_regexps(&job, service)?;

        Ok(DiscoveryJob {
            namespace: service.namespace.clone(),
            regions: spec.regions.clone(),
            roles: spec.roles.clone(),
            search_tags,
            custom_tags: spec.custom_tags.clone(),
            dimension_name_requirements: spec.dimension_name_requirements.clone(),
            dimensions_regexps,
            recently_active_only: spec.recently_active_only,
            include_context_on_info_metrics: spec.include_context_on_info_metrics,
            include_linked_accounts: spec.include_linked_accounts.clone(),
            rounding_period: spec.rounding_period,
            exported_tags_on_metrics: config
                .discovery
                .exported_tags_on_metrics
                .get(&service.namespace)
                .cloned()
                .unwrap_or_default(),
            metrics,
        })
    }

    fn check_exported_tags(&self, config: &ScrapeConfig) -> Result<(), ConfigError> {
        for namespace in config.discovery.exported_tags_on_metrics.keys() {
            if self
                .canonical_service(namespace, || AliasSite::ExportedTags)?
                .is_none()
            {
                return Err(ConfigError::UnknownExportedTagNamespace {
                    namespace: namespace.clone(),
                });
            }
            let matched = config
                .discovery
                .jobs
                .iter()
                .any(|job| &job.job_type == namespace);
            if !matched {
                return Err(ConfigError::UnmatchedExportedTagNamespace {
                    namespace: namespace.clone(),
                });
            }
        }
        Ok(())
    }

    fn custom_namespace_job(
        &mut self,
        index: usize,
        spec: &CustomNamespaceJobSpec,
    ) -> Result<CustomNamespaceJob, ConfigError> {
        let job = JobRef::new(JobCategory::CustomNamespace, index);
        if spec.name.is_empty() {
            return Err(ConfigError::EmptyJobName { job });
        }
        let job = job.labelled(&spec.name);
        if spec.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace { job });
        }
        check_roles(&job, &spec.roles)?;
        if spec.regions.is_empty() {
            return Err(ConfigError::EmptyRegions { job });
        }
        if spec.metrics.is_empty() {
            return Err(ConfigError::EmptyMetrics { job });
        }
        let defaults = spec.defaults();
        let metrics = self.metrics(&job, &spec.metrics, Cascade::with_job(&defaults))?;
        if spec.rounding_period.is_some() {
            self.warn(ConfigWarning::RoundingPeriodDeprecated { job });
        }

        Ok(CustomNamespaceJob {
            name: spec.name.clone(),
            namespace: spec.namespace.clone(),
            regions: spec.regions.clone(),
            roles: spec.roles.clone(),
            custom_tags: spec.custom_tags.clone(),
            dimension_name_requirements: spec.dimension_name_requirements.clone(),
            recently_active_only: spec.recently_active_only,
            include_linked_accounts: spec.include_linked_accounts.clone(),
            rounding_period: spec.rounding_period,
            metrics,
        })
    }

    // An empty metric list is accepted here. Job-level defaults do not exist.
    fn static_job(&mut self, index: usize, spec: &StaticJobSpec) -> Result<StaticJob, ConfigError> {
        let job = JobRef::new(JobCategory::Static, index);
        if spec.name.is_empty() {
            return Err(ConfigError::EmptyJobName { job });
        }
        let job = job.labelled(&spec.name);
        if spec.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace { job });
        }
        check_roles(&job, &spec.roles)?;
        if spec.regions.is_empty() {
            return Err(ConfigError::EmptyRegions { job });
        }
        let metrics = self.metrics(&job, &spec.metrics, Cascade::metric_only())?;

        Ok(StaticJob {
            name: spec.name.clone(),
            namespace: spec.namespace.clone(),
            regions: spec.regions.clone(),
            roles: spec.roles.clone(),
            custom_tags: spec.custom_tags.clone(),
            dimensions: spec.dimensions.clone(),
            metrics,
        })
    }

    fn metrics(
        &mut self,
        job: &JobRef,
        specs: &[MetricSpec],
        cascade: Cascade<'_>,
    ) -> Result<Vec<MetricConfig>, ConfigError> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| self.metric(job, index, spec, cascade))
            .collect()
    }

    fn metric(
        &mut self,
        job: &JobRef,
        index: usize,
        spec: &MetricSpec,
        cascade: Cascade<'_>,
    ) -> Result<MetricConfig, ConfigError> {
        let metric = MetricRef::new(index, &spec.name);
        if spec.name.is_empty() {
            return Err(ConfigError::EmptyMetricName {
                job: job.clone(),
                metric,
            });
        }
        let Some(statistics) = cascade.statistics(spec) else {
            return Err(ConfigError::EmptyStatistics {
                job: job.clone(),
                metric,
            });
        };
        let period = cascade.period(spec);
        if period < 1 {
            return Err(ConfigError::InvalidPeriod {
                job: job.clone(),
                metric,
                period,
            });
        }
        let length = cascade.length(spec);
        if spec.delay.is_some_and(|delay| delay != 0) {
            self.warn(ConfigWarning::MetricDelayIgnored {
                job: job.clone(),
                metric: metric.clone(),
            });
        }
        if length < period {
            return Err(ConfigError::InsufficientLength {
                job: job.clone(),
                metric,
                length,
                period,
            });
        }

        Ok(MetricConfig {
            name: spec.name.clone(),
            statistics,
            period,
            length,
            delay: cascade.delay(),
            nil_to_zero: cascade.nil_to_zero(spec),
            add_cloudwatch_timestamp: cascade.add_cloudwatch_timestamp(spec),
        })
    }

    /// Looks `name` up as a canonical namespace. An alias match is an error naming the
    /// canonical form; no match at all is `Ok(None)`.
    fn canonical_service(
        &self,
        name: &str,
        site: impl FnOnce() -> AliasSite,
    ) -> Result<Option<&'a ServiceDescriptor>, ConfigError> {
        if let Some(service) = self.registry.lookup_by_namespace(name) {
            return Ok(Some(service));
        }
        match self.registry.lookup_by_alias(name) {
            Some(service) => Err(ConfigError::AliasNotAllowed {
                site: site(),
                namespace: service.namespace.clone(),
                alias: service.alias.clone(),
            }),
            None => Ok(None),
        }
    }

    fn warn(&mut self, warning: ConfigWarning) {
        match &warning {
            ConfigWarning::MetricDelayIgnored { job, metric } => {
                warn!(target: "config", job = %job, metric = %metric.name, "{warning}")
            }
            ConfigWarning::RoundingPeriodDeprecated { job } => {
                warn!(target: "config", job = %job, "{warning}")
            }
            _ => warn!(target: "config", "{warning}"),
        }
        self.warnings.push(warning);
    }
}

fn check_roles(job: &JobRef, roles: &[Role]) -> Result<(), ConfigError> {
    if roles.is_empty() {
        return Err(ConfigError::NoRoles { job: job.clone() });
    }
    for (role_index, role) in roles.iter().enumerate() {
        if role.role_arn.is_empty() && !role.external_id.is_empty() {
            return Err(ConfigError::InvalidRole {
                job: job.clone(),
                role_index,
            });
        }
    }
    Ok(())
}

fn dimensions_regexps(
    job: &JobRef,
    service: &ServiceDescriptor,
) -> Result<Vec<DimensionsRegexp>, ConfigError> {
    service
        .dimension_patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .map(DimensionsRegexp::new)
                .map_err(|source| ConfigError::InvalidDimensionPattern {
                    job: job.clone(),
                    namespace: service.namespace.clone(),
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}
