use super::EntityStore;
use crate::errors::StoreError;
use crate::query::pagination::FindResult;
use crate::query::selection;
use crate::query::Filters;
use crate::tracked::Tracked;
use crate::traits::Entity;
use async_stream::try_stream;
use futures::Stream;
use serde_json::{Map, Value};

impl EntityStore {
    /// One page of a search, with the server's total match count
    pub async fn find_page<T: Entity>(
        &self,
        filters: &Filters,
        page: u32,
        per_page: u32,
    ) -> Result<FindResult<T>, StoreError> {
        let criteria = filters.translate()?;
        self.fetch_page::<T>(filters, &criteria, page, per_page).await
    }

    /// Every match of a bounded search, in server order
    ///
    /// A one-item probe learns the match count first; more than
    /// `max_find_results` matches is an error rather than a silent truncation.
    pub async fn find<T: Entity>(&self, filters: &Filters) -> Result<Vec<Tracked<T>>, StoreError> {
        let criteria = filters.translate()?;
        let probe = self.fetch_page::<T>(filters, &criteria, 1, 1).await?;

        if probe.count > self.options.max_find_results {
            return Err(StoreError::TooManyResults {
                type_name: T::TYPE_NAME,
                count: probe.count,
                limit: self.options.max_find_results,
            });
        }

        // the probe already holds every match
        if probe.count <= probe.items.len() {
            return Ok(probe.items);
        }

        let per_page = u32::try_from(probe.count).unwrap_or(u32::MAX);
        let all = self.fetch_page::<T>(filters, &criteria, 1, per_page).await?;
        Ok(all.items)
    }

    /// The first match, if any
    pub async fn find_one<T: Entity>(&self, filters: &Filters) -> Result<Option<Tracked<T>>, StoreError> {
        let page = self.find_page::<T>(filters, 1, 1).await?;
        Ok(page.items.into_iter().next())
    }

    /// Stream every match, one page of `query_batch` records at a time
    pub fn find_iter<T: Entity>(
        &self,
        filters: Filters,
    ) -> Result<impl Stream<Item = Result<Tracked<T>, StoreError>> + '_, StoreError> {
        self.find_iter_with_batch(filters, self.options.query_batch)
    }

    /// Stream every match with an explicit page size
    ///
    /// Pages are requested only as the consumer reaches them, and the stream ends
    /// at the first page shorter than `query_batch`. A zero batch or an
    /// untranslatable filter is rejected before any request.
    pub fn find_iter_with_batch<T: Entity>(
        &self,
        filters: Filters,
        query_batch: u32,
    ) -> Result<impl Stream<Item = Result<Tracked<T>, StoreError>> + '_, StoreError> {
        if query_batch == 0 {
            return Err(StoreError::InvalidBatchSize(query_batch));
        }
        let criteria = filters.translate()?;

        Ok(try_stream! {
            let mut page = 1;
            loop {
                let result = self.fetch_page::<T>(&filters, &criteria, page, query_batch).await?;
                let received = result.items.len();
                crate::debug_log!(type_name = T::TYPE_NAME, page, received, "search page");

                for record in result.items {
                    yield record;
                }

                if received < query_batch as usize {
                    break;
                }
                page += 1;
            }
        })
    }

    pub(crate) async fn fetch_page<T: Entity>(
        &self,
        filters: &Filters,
        criteria: &Map<String, Value>,
        page: u32,
        per_page: u32,
    ) -> Result<FindResult<T>, StoreError> {
        let document = selection::find_page_document::<T>(&selection::full_selection::<T>());

        let mut variables = Map::new();
        variables.insert(
            "filter".to_string(),
            filters.find_filter(page, per_page).to_variable(),
        );
        variables.insert(
            selection::filter_argument::<T>(),
            Value::Object(criteria.clone()),
        );

        let data = self.executor.execute(&document, Value::Object(variables)).await?;
        let mut result = parse_page::<T>(data, page, per_page)?;
        result.items = result
            .items
            .into_iter()
            .map(|record| self.remember(record))
            .collect();
        Ok(result)
    }
}

fn parse_page<T: Entity>(data: Value, page: u32, per_page: u32) -> Result<FindResult<T>, StoreError> {
    let root = selection::find_many_root::<T>();

    let Value::Object(mut data) = data else {
        return Err(StoreError::malformed(T::TYPE_NAME, "reply data is not an object"));
    };
    let Some(Value::Object(mut body)) = data.remove(&root) else {
        return Err(StoreError::malformed(
            T::TYPE_NAME,
            format!("reply has no '{}' object", root),
        ));
    };

    let count = body
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| StoreError::malformed(T::TYPE_NAME, "search reply has no count"))?;
    let count = usize::try_from(count).unwrap_or(usize::MAX);

    let items = match body.remove(T::PLURAL) {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(StoreError::malformed(
                T::TYPE_NAME,
                format!("search reply has no '{}' list", T::PLURAL),
            ))
        }
    };

    let items = items
        .into_iter()
        .map(Tracked::<T>::from_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::malformed(T::TYPE_NAME, e.to_string()))?;

    Ok(FindResult {
        items,
        count,
        page,
        per_page,
    })
}
