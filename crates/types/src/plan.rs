//! App service plan (`Microsoft.Web/serverfarms`) shapes.

use serde::{Deserialize, Serialize};

/// Hosting plan as returned by the resource manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServicePlan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub properties: ServicePlanProperties,
    #[serde(default)]
    pub sku: Option<ServicePlanSku>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlanProperties {
    #[serde(default)]
    pub geo_region: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServicePlanSku {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl ServicePlan {
    /// Region reported by the plan, preferring `properties.geoRegion` over
    /// the resource `location`.
    pub fn region(&self) -> Option<&str> {
        non_blank(self.properties.geo_region.as_deref()).or_else(|| non_blank(self.location.as_deref()))
    }

    pub fn tier(&self) -> Option<&str> {
        self.sku.as_ref().and_then(|sku| sku.tier.as_deref())
    }

    /// Reduce the plan to what a workflow create request needs.
    ///
    /// Returns `None` when the plan reports no region. A missing tier is kept
    /// as an empty string so that SKU mapping reports it.
    pub fn to_reference(&self) -> Option<ServicePlanReference> {
        let region = self.region()?;
        Some(ServicePlanReference {
            id: self.id.clone(),
            region: region.to_string(),
            tier: self.tier().unwrap_or_default().to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Identifier, region and pricing tier of an existing hosting plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePlanReference {
    pub id: String,
    pub region: String,
    pub tier: String,
}
