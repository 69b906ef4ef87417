//! Decoding of list requests from URL query strings.
//!
//! ```text
//! ?page=2&perPage=25&sort=createdAt&order=DESC&filter={"role":"admin"}
//! ?target=postId&id=posts_…&page=1&perPage=10
//! ```

use backoffice_core::validation::validate_with;
use backoffice_core::HttpError;
use garde::Validate;

use crate::config::DataConfig;
use crate::filter::FilterMap;
use crate::page::Pagination;
use crate::query::{ListQuery, ReferenceQuery};
use crate::sort::{SortOrder, SortSpec};

/// Raw list parameters, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[garde(context(DataConfig))]
pub struct ListParams {
    #[garde(skip)]
    pub page: Option<i64>,
    #[garde(custom(within_max_per_page))]
    pub per_page: Option<u64>,
    #[garde(length(min = 1))]
    pub sort: Option<String>,
    #[garde(skip)]
    pub order: SortOrder,
    #[garde(skip)]
    pub filter: Option<FilterMap>,
    #[garde(length(min = 1))]
    pub target: Option<String>,
    #[garde(length(min = 1))]
    pub id: Option<String>,
}

fn within_max_per_page(value: &Option<u64>, config: &DataConfig) -> garde::Result {
    match value {
        Some(n) if *n > config.max_per_page => Err(garde::Error::new(format!(
            "must not exceed {}",
            config.max_per_page
        ))),
        _ => Ok(()),
    }
}

fn bad_param(name: &str, err: impl std::fmt::Display) -> HttpError {
    HttpError::BadRequest(format!("invalid `{name}` parameter: {err}"))
}

impl ListParams {
    /// Parse a URL query string (without the leading `?`). Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, HttpError> {
        let mut params = ListParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "page" => params.page = Some(value.trim().parse().map_err(|e| bad_param("page", e))?),
                "perPage" | "per_page" => {
                    params.per_page = Some(value.trim().parse().map_err(|e| bad_param("perPage", e))?)
                }
                "sort" => params.sort = Some(value.into_owned()),
                "order" => params.order = SortOrder::from(&*value),
                "filter" => {
                    params.filter =
                        Some(serde_json::from_str(&value).map_err(|e| bad_param("filter", e))?)
                }
                "target" => params.target = Some(value.into_owned()),
                "id" => params.id = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(params)
    }

    /// Apply configured defaults and build the engine descriptor.
    pub fn into_query(self, config: &DataConfig) -> ListQuery {
        let per_page = self
            .per_page
            .or((config.default_per_page > 0).then_some(config.default_per_page));
        let pagination = (self.page.is_some() || per_page.is_some()).then_some(Pagination {
            page: self.page,
            per_page,
        });
        ListQuery {
            pagination,
            sort: self.sort.map(|field| SortSpec { field, order: self.order }),
            filter: self.filter,
        }
    }

    /// Like [`into_query`](Self::into_query), for reference lists. `target` and `id` are required.
    pub fn into_reference_query(mut self, config: &DataConfig) -> Result<ReferenceQuery, HttpError> {
        let target = self
            .target
            .take()
            .ok_or_else(|| HttpError::BadRequest("missing `target` parameter".into()))?;
        let id = self
            .id
            .take()
            .ok_or_else(|| HttpError::BadRequest("missing `id` parameter".into()))?;
        Ok(ReferenceQuery::new(target, id).with_query(self.into_query(config)))
    }
}

/// Parse, validate and default a list request.
pub fn decode_list_query(query: &str, config: &DataConfig) -> Result<ListQuery, HttpError> {
    let params = ListParams::from_query(query)?;
    validate_with(&params, config)?;
    Ok(params.into_query(config))
}

/// Parse, validate and default a reference-list request.
pub fn decode_reference_query(query: &str, config: &DataConfig) -> Result<ReferenceQuery, HttpError> {
    let params = ListParams::from_query(query)?;
    validate_with(&params, config)?;
    params.into_reference_query(config)
}
