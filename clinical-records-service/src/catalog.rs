use crate::error::{ClinicalRecordsError, ClinicalRecordsResult};
use entity_store::{DiagnosisRepository, Disease, DiseaseRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Disease catalog with referential integrity on delete.
pub struct DiseaseCatalog {
    diseases: Arc<dyn DiseaseRepository>,
    diagnoses: Arc<dyn DiagnosisRepository>,
}

impl DiseaseCatalog {
    pub fn new(
        diseases: Arc<dyn DiseaseRepository>,
        diagnoses: Arc<dyn DiagnosisRepository>,
    ) -> Self {
        Self { diseases, diagnoses }
    }

    pub async fn add(&self, disease: Disease) -> ClinicalRecordsResult<Disease> {
        if disease.code.trim().is_empty() || disease.name.trim().is_empty() {
            return Err(ClinicalRecordsError::Validation(
                "disease code and name must not be blank".to_string(),
            ));
        }
        let saved = self.diseases.save(&disease).await?;
        info!(code = %saved.code, "disease saved to catalog");
        Ok(saved)
    }

    pub async fn find(&self, code: &str) -> ClinicalRecordsResult<Disease> {
        self.diseases
            .find_by_code(code)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("disease", code))
    }

    pub async fn list(&self) -> ClinicalRecordsResult<Vec<Disease>> {
        Ok(self.diseases.list().await?)
    }

    /// Remove a disease from the catalog.
    ///
    /// Blocked while any diagnosis references the code — historical
    /// diagnoses must keep resolving.
    pub async fn delete(&self, code: &str) -> ClinicalRecordsResult<()> {
        if self.diseases.find_by_code(code).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("disease", code));
        }

        if self.diagnoses.exists_for_disease(code).await? {
            warn!(%code, "disease delete blocked by existing diagnoses");
            return Err(ClinicalRecordsError::ReferencedEntity {
                entity: "disease",
                id: code.to_string(),
                dependents: "diagnoses",
            });
        }

        self.diseases.delete(code).await?;
        Ok(())
    }
}
