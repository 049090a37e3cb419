use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::profiles::types::{Profile, ProfileType};
use crate::utils::age::calculate_age;

/// Candidate card for the browse grid. Contact details stay private until a
/// match flow exists; the card carries presentation fields only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub id: String,
    pub name: String,
    pub profile_type: ProfileType,
    pub profile_image: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub mother_tongue: Option<String>,
    pub about: Option<String>,
}

impl From<Profile> for CandidateDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            profile_type: p.profile_type,
            profile_image: p.profile_image,
            age: p.date_of_birth.map(calculate_age),
            date_of_birth: p.date_of_birth,
            height: p.height,
            education: p.education,
            occupation: p.occupation,
            city: p.city,
            state: p.state,
            religion: p.religion,
            mother_tongue: p.mother_tongue,
            about: p.about,
        }
    }
}

/// Client-side narrowing of the candidate list: a case-insensitive substring
/// search over name/city/state plus exact-match facets. Pure and idempotent;
/// an empty filter is the identity.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilter {
    pub search: Option<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub education: Option<String>,
}

impl CandidateFilter {
    pub fn apply(&self, candidates: &[CandidateDto]) -> Vec<CandidateDto> {
        candidates
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }

    fn matches(&self, candidate: &CandidateDto) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let haystacks = [
                Some(candidate.name.as_str()),
                candidate.city.as_deref(),
                candidate.state.as_deref(),
            ];
            let hit = haystacks
                .into_iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        fn facet(selected: &Option<String>, value: &Option<String>) -> bool {
            match selected.as_deref().filter(|s| !s.is_empty()) {
                Some(want) => value.as_deref() == Some(want),
                None => true,
            }
        }

        facet(&self.state, &candidate.state)
            && facet(&self.religion, &candidate.religion)
            && facet(&self.education, &candidate.education)
    }
}

/// Distinct facet values over the unfiltered candidate set, for the filter
/// dropdowns.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub states: Vec<String>,
    pub religions: Vec<String>,
    pub educations: Vec<String>,
}

impl FilterOptions {
    pub fn from_candidates(candidates: &[CandidateDto]) -> Self {
        fn distinct(values: impl Iterator<Item = Option<String>>) -> Vec<String> {
            let mut out: Vec<String> = values.flatten().collect();
            out.sort();
            out.dedup();
            out
        }

        Self {
            states: distinct(candidates.iter().map(|c| c.state.clone())),
            religions: distinct(candidates.iter().map(|c| c.religion.clone())),
            educations: distinct(candidates.iter().map(|c| c.education.clone())),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseReq {
    #[serde(default)]
    pub filter: CandidateFilter,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResp {
    pub candidates: Vec<CandidateDto>,
    pub filter_options: FilterOptions,
    pub total_unfiltered: usize,
}
