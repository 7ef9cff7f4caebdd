/// Arrow schemas and dataframe builders for the tables the app renders.
///
/// Column names are the ones shown to the user.
pub mod frames {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use arrow::record_batch::RecordBatch;

    use crate::{CoreError, LabelDistribution, PageCount, VisitEvent};

    /// Schema for the raw visit log table.
    pub fn visit_log_schema() -> Schema {
        Schema::new(vec![
            Field::new("Pagename", DataType::Utf8, false),
            Field::new("Time_of_Visit", DataType::Float64, false),
        ])
    }

    /// Schema for visit counts per page.
    pub fn page_counts_schema() -> Schema {
        Schema::new(vec![
            Field::new("Pagename", DataType::Utf8, false),
            Field::new("Counts", DataType::Int64, false),
        ])
    }

    /// Schema for a prediction's probability per emotion.
    pub fn distribution_schema() -> Schema {
        Schema::new(vec![
            Field::new("emotions", DataType::Utf8, false),
            Field::new("probability", DataType::Float64, false),
        ])
    }

    pub fn visits_batch(events: &[VisitEvent]) -> Result<RecordBatch, CoreError> {
        let pages: StringArray = events.iter().map(|e| Some(e.page_or_text.as_str())).collect();
        let times: Float64Array = events.iter().map(|e| Some(e.timestamp)).collect();
        batch(visit_log_schema(), pages, times)
    }

    pub fn page_counts_batch(counts: &[PageCount]) -> Result<RecordBatch, CoreError> {
        let pages: StringArray = counts.iter().map(|c| Some(c.page.as_str())).collect();
        let totals: Int64Array = counts.iter().map(|c| Some(c.count as i64)).collect();
        let schema: SchemaRef = Arc::new(page_counts_schema());
        Ok(RecordBatch::try_new(
            schema,
            vec![Arc::new(pages), Arc::new(totals)],
        )?)
    }

    pub fn distribution_batch(distribution: &LabelDistribution) -> Result<RecordBatch, CoreError> {
        let labels: StringArray = distribution
            .entries()
            .iter()
            .map(|(l, _)| Some(l.as_str()))
            .collect();
        let probs: Float64Array = distribution.entries().iter().map(|(_, p)| Some(*p)).collect();
        batch(distribution_schema(), labels, probs)
    }

    fn batch(
        schema: Schema,
        keys: StringArray,
        values: Float64Array,
    ) -> Result<RecordBatch, CoreError> {
        Ok(RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(keys), Arc::new(values)],
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::frames;
    use crate::{LabelDistribution, VisitEvent, page_counts};
    use arrow::array::{Array, Int64Array, StringArray};

    #[test]
    fn visit_log_schema_has_expected_fields() {
        let schema = frames::visit_log_schema();
        assert_eq!(schema.fields().len(), 2);
        assert!(schema.field_with_name("Pagename").is_ok());
        assert!(schema.field_with_name("Time_of_Visit").is_ok());
    }

    #[test]
    fn empty_visits_produce_zero_row_batches() {
        let visits = frames::visits_batch(&[]).unwrap();
        assert_eq!(visits.num_rows(), 0);
        assert_eq!(visits.num_columns(), 2);

        let counts = frames::page_counts_batch(&[]).unwrap();
        assert_eq!(counts.num_rows(), 0);
    }

    #[test]
    fn page_counts_batch_carries_counts() {
        let events = vec![
            VisitEvent::new("Home", 1.0),
            VisitEvent::new("Home", 2.0),
            VisitEvent::new("Monitor", 3.0),
        ];
        let batch = frames::page_counts_batch(&page_counts(&events)).unwrap();
        let pages = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let counts = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(pages.value(0), "Home");
        assert_eq!(counts.value(0), 2);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn distribution_batch_one_row_per_label() {
        let dist = LabelDistribution::new(vec![
            ("anger".into(), 0.2),
            ("happy".into(), 0.8),
        ]);
        let batch = frames::distribution_batch(&dist).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).name(), "emotions");
        assert_eq!(batch.schema().field(1).name(), "probability");
    }
}
