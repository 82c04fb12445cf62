//! District rollup arithmetic, kept pure so it can be tested without a store.

use eduaudit_core::{
  complaint::{Complaint, ComplaintStatus},
  district::CategoryCount,
};

/// Recomputed counters for one district.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Rollup {
  pub total:          i64,
  pub resolved:       i64,
  pub pending:        i64,
  /// Rounded mean resolution time in days over resolved complaints;
  /// 0 when none are resolved.
  pub avg_days:       i64,
  /// Top 3 categories by count, descending. Ties keep first-encountered
  /// order, which is why callers must pass complaints in insertion order.
  pub top_categories: Vec<CategoryCount>,
}

pub(crate) fn rollup<'a, I>(complaints: I) -> Rollup
where
  I: IntoIterator<Item = &'a Complaint>,
{
  let mut total = 0i64;
  let mut categories: Vec<CategoryCount> = Vec::new();
  let mut resolved = 0i64;
  let mut resolution_days_sum = 0f64;

  for complaint in complaints {
    total += 1;

    match categories.iter_mut().find(|c| c.category == complaint.category) {
      Some(entry) => entry.count += 1,
      None => categories.push(CategoryCount {
        category: complaint.category.clone(),
        count:    1,
      }),
    }

    if complaint.status == ComplaintStatus::Resolved {
      resolved += 1;
      let elapsed = complaint.updated_at - complaint.created_at;
      resolution_days_sum += elapsed.num_seconds() as f64 / 86_400.0;
    }
  }

  // Stable sort keeps first-encountered order among equal counts.
  categories.sort_by(|a, b| b.count.cmp(&a.count));
  categories.truncate(3);

  let avg_days = if resolved > 0 {
    (resolution_days_sum / resolved as f64).round() as i64
  } else {
    0
  };

  Rollup {
    total,
    resolved,
    pending: total - resolved,
    avg_days,
    top_categories: categories,
  }
}
