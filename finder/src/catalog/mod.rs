//! Attribute catalog.
//!
//! The catalog offered to the user is the built-in device attributes, unioned
//! with one attribute per diagnostic, then with the selected driver's own
//! attributes (and, in the search toolbox, one attribute per compliance rule).
//! The union keeps the first entry seen for a name; the result is sorted by
//! title.

mod attribute;
mod sources;

use std::cmp::Ordering;
use std::collections::HashSet;

use glob_match::glob_match;

pub use attribute::{AttributeDescriptor, Choice, ChoiceValue, Scope, SemanticType};
pub use sources::{
    CatalogSources, DeviceType, Diagnostic, Domain, DriverAttribute, Policy, Rule, RuleOutcome,
};

use crate::labels::Translate;
use crate::query::escape_key;

/// Which host surface the builder is embedded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Embedding {
    /// Dynamic group dialog: device, diagnostic and driver attributes.
    #[default]
    Dialog,
    /// Device search toolbox: additionally offers compliance rule outcomes.
    Toolbox,
}

/// De-duplicated, title-sorted attribute list for one driver selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    attributes: Vec<AttributeDescriptor>,
}

impl Catalog {
    /// Assemble the catalog for the given driver (`None` = any driver).
    ///
    /// Collections that have not been fetched yet simply contribute nothing.
    pub fn build(
        sources: &CatalogSources,
        driver: Option<&DeviceType>,
        embedding: Embedding,
        tr: &dyn Translate,
    ) -> Self {
        let mut attributes = generic_attributes(sources, tr);

        if let Some(diagnostics) = &sources.diagnostics {
            attributes = union(attributes, diagnostic_attributes(diagnostics));
        }

        if let Some(driver) = driver {
            attributes = union(attributes, driver_attributes(driver, tr));
        }

        if embedding == Embedding::Toolbox {
            if let Some(policies) = &sources.policies {
                attributes = union(attributes, rule_attributes(policies, tr));
            }
        }

        sort_by_title(&mut attributes);

        tracing::trace!(
            count = attributes.len(),
            driver = driver.map(|d| d.name.as_str()),
            "catalog assembled"
        );

        Self { attributes }
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Find an attribute by its bracket name.
    pub fn find(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes whose title matches a case-insensitive glob.
    ///
    /// A pattern without `*` or `?` matches anywhere in the title.
    pub fn matching(&self, pattern: &str) -> Vec<&AttributeDescriptor> {
        let pattern = pattern.to_lowercase();
        let pattern = if pattern.contains(['*', '?']) {
            pattern
        } else {
            format!("*{}*", pattern)
        };
        self.attributes
            .iter()
            .filter(|a| glob_match(&pattern, &a.title.to_lowercase()))
            .collect()
    }
}

/// Union of two attribute lists, keeping the first entry seen for each name.
pub fn union(
    first: Vec<AttributeDescriptor>,
    second: Vec<AttributeDescriptor>,
) -> Vec<AttributeDescriptor> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|a| seen.insert(a.name.clone()))
        .collect()
}

/// Stable sort by title, ignoring case first.
pub fn sort_by_title(attributes: &mut [AttributeDescriptor]) {
    attributes.sort_by(|a, b| compare_titles(&a.title, &b.title));
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn text(name: &str, tr: &dyn Translate) -> AttributeDescriptor {
    AttributeDescriptor::new(name, tr.translate(name), SemanticType::Text)
}

/// Built-in device attributes.
pub fn generic_attributes(sources: &CatalogSources, tr: &dyn Translate) -> Vec<AttributeDescriptor> {
    let domains = sources
        .domains
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|d| Choice::number(d.name.clone(), d.id))
        .collect();

    let choices = |entries: &[(&str, &str)]| -> Vec<Choice> {
        entries
            .iter()
            .map(|(label, value)| Choice::text(tr.translate(label), *value))
            .collect()
    };

    let mut device_type = AttributeDescriptor::new("Type", tr.translate("Type"), SemanticType::DeviceType);
    if let Some(description) = sources.sample_driver_description() {
        device_type = device_type.with_example(description);
    }

    vec![
        text("Comments", tr),
        text("Contact", tr),
        AttributeDescriptor::new("Creation date", tr.translate("Creation date"), SemanticType::Date),
        AttributeDescriptor::new("Device", tr.translate("Device"), SemanticType::Id),
        AttributeDescriptor::new("Domain", tr.translate("Domain"), SemanticType::Enum).with_choices(domains),
        text("Family", tr),
        AttributeDescriptor::new("IP", tr.translate("IP"), SemanticType::IpAddress),
        AttributeDescriptor::new("Interfaces", tr.translate("Interface"), SemanticType::Text),
        AttributeDescriptor::new("Last change date", tr.translate("Last change date"), SemanticType::Date),
        text("Location", tr),
        AttributeDescriptor::new("MAC", tr.translate("MAC"), SemanticType::MacAddress),
        text("Module", tr),
        text("Name", tr),
        AttributeDescriptor::new("Network class", tr.translate("Network class"), SemanticType::Enum)
            .with_choices(choices(&[
                ("Firewall", "FIREWALL"),
                ("Load balancer", "LOADBALANCER"),
                ("Router", "ROUTER"),
                ("Server", "SERVER"),
                ("Switch", "SWITCH"),
                ("Switch router", "SWITCHROUTER"),
                ("Access point", "ACCESSPOINT"),
                ("Wireless controller", "WIRELESSCONTROLLER"),
                ("Console server", "CONSOLESERVER"),
                ("Unknown", "UNKNOWN"),
            ])),
        AttributeDescriptor::new("Software Level", tr.translate("Software Level"), SemanticType::Enum)
            .with_choices(choices(&[
                ("Gold", "GOLD"),
                ("Silver", "SILVER"),
                ("Bronze", "BRONZE"),
                ("Non compliant", "NON-COMPLIANT"),
                ("Unknown", "UNKNOWN"),
            ])),
        text("Software version", tr),
        AttributeDescriptor::new("Status", tr.translate("Status"), SemanticType::Enum).with_choices(choices(&[
            ("Production", "INPRODUCTION"),
            ("Disabled", "DISABLED"),
            ("PreProduction", "PREPRODUCTION"),
        ])),
        device_type,
        text("VRF", tr),
        AttributeDescriptor::new("Virtual Name", tr.translate("Virtual name"), SemanticType::Text),
    ]
}

/// One attribute per diagnostic, typed by the diagnostic's result.
pub fn diagnostic_attributes(diagnostics: &[Diagnostic]) -> Vec<AttributeDescriptor> {
    diagnostics
        .iter()
        .map(|d| {
            AttributeDescriptor::new(
                format!("Diagnostic \"{}\"", escape_key(&d.name)),
                format!("Diagnostic \"{}\"", d.name),
                d.result_type,
            )
            .with_scope(Scope::Diagnostic)
        })
        .collect()
}

/// Attributes declared by a driver, keyed by their title.
pub fn driver_attributes(driver: &DeviceType, tr: &dyn Translate) -> Vec<AttributeDescriptor> {
    driver
        .attributes
        .iter()
        .map(|a| {
            AttributeDescriptor::new(escape_key(&a.title), tr.translate(&a.title), a.semantic_type)
                .with_scope(Scope::Driver)
        })
        .collect()
}

/// One enum attribute per compliance rule, choosing among check outcomes.
pub fn rule_attributes(policies: &[Policy], tr: &dyn Translate) -> Vec<AttributeDescriptor> {
    let outcomes: Vec<Choice> = RuleOutcome::ALL
        .iter()
        .map(|o| Choice::text(tr.translate(o.label()), o.keyword()))
        .collect();

    policies
        .iter()
        .flat_map(|policy| {
            let outcomes = &outcomes;
            policy.rules.iter().map(move |rule| {
                AttributeDescriptor::new(
                    format!("Rule > {} > {}", escape_key(&policy.name), escape_key(&rule.name)),
                    format!("Rule > {} > {}", policy.name, rule.name),
                    SemanticType::Enum,
                )
                .with_choices(outcomes.clone())
                .with_scope(Scope::ComplianceRule)
            })
        })
        .collect()
}
