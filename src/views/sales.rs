//! Sales dashboard: stat cards, sales chart, sale form and recent sales.

use crate::{
    core::{
        aggregation::{ChartSeries, Period, aggregate_sales},
        metrics::SalesSummary,
        product::get_all_products,
        sale::{SaleRequest, get_all_sales, preview_total, record_sale},
    },
    entities::{product, sale},
    errors::Result,
    views::format::{format_bar, format_currency, format_date},
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::debug;

const CHART_WIDTH: usize = 30;

/// Message shown above the sale form after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleStatus {
    pub success: bool,
    pub message: String,
}

/// Sale form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleForm {
    pub product_id: Option<i64>,
    pub quantity: i64,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            product_id: None,
            quantity: 1,
        }
    }
}

impl From<SaleForm> for SaleRequest {
    fn from(form: SaleForm) -> Self {
        Self {
            product_id: form.product_id,
            quantity: form.quantity,
        }
    }
}

/// State owned by the sales dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesView {
    /// Selected chart tab
    pub period: Period,
    pub form: SaleForm,
    pub status: Option<SaleStatus>,
    recent_limit: u64,
}

impl SalesView {
    #[must_use]
    pub fn new(period: Period, recent_limit: u64) -> Self {
        Self {
            period,
            form: SaleForm::default(),
            status: None,
            recent_limit,
        }
    }

    pub fn select_period(&mut self, period: Period) {
        debug!(%period, "Chart period selected");
        self.period = period;
    }

    pub fn select_product(&mut self, product_id: Option<i64>) {
        self.form.product_id = product_id;
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.form.quantity = quantity;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Submits the sale form.
    ///
    /// Validation failures become a failure status and `Ok(None)`; the form
    /// keeps its values so the user can correct them. A completed sale resets
    /// the form.
    ///
    /// # Errors
    /// Only store failures are returned.
    pub async fn submit(
        &mut self,
        db: &DatabaseConnection,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<sale::Model>> {
        match record_sale(db, self.form.into(), timestamp).await {
            Ok(sale) => {
                self.form = SaleForm::default();
                self.status = Some(SaleStatus {
                    success: true,
                    message: "Sale completed successfully!".to_string(),
                });
                Ok(Some(sale))
            }
            Err(e) if e.is_validation() => {
                self.status = Some(SaleStatus {
                    success: false,
                    message: e.to_string(),
                });
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Chart data for the selected tab.
    #[must_use]
    pub fn chart<Tz: TimeZone>(&self, sales: &[sale::Model], now: &DateTime<Tz>) -> ChartSeries {
        aggregate_sales(sales, self.period, now)
    }

    /// Loads current state from the store and renders the view.
    pub async fn render<Tz>(&self, db: &DatabaseConnection, now: &DateTime<Tz>) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let products = get_all_products(db).await?;
        let sales = get_all_sales(db).await?;
        self.render_with(&products, &sales, now)
    }

    /// Renders from already-loaded state. `sales` must be newest first.
    pub fn render_with<Tz>(
        &self,
        products: &[product::Model],
        sales: &[sale::Model],
        now: &DateTime<Tz>,
    ) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut out = String::new();
        let summary = SalesSummary::from_sales(sales);

        writeln!(out, "Sales Dashboard")?;
        writeln!(out, "Make sales and track your sales performance")?;
        writeln!(out)?;
        writeln!(
            out,
            "Total Sales: {} | Items Sold: {} | Average Sale: {}",
            format_currency(summary.total_sales),
            summary.items_sold,
            format_currency(summary.average_sale)
        )?;
        writeln!(out)?;

        out.push_str(&render_chart(&self.chart(sales, now))?);
        writeln!(out)?;

        writeln!(out, "Make a Sale")?;
        if let Some(status) = &self.status {
            let mark = if status.success { "✅" } else { "❌" };
            writeln!(out, "{mark} {}", status.message)?;
        }
        for p in products {
            let marker = if self.form.product_id == Some(p.id) { ">" } else { " " };
            let availability = if p.stock > 0 {
                format!("{} in stock", p.stock)
            } else {
                "Out of stock".to_string()
            };
            writeln!(
                out,
                "{marker} [{}] {} ({}) - {availability}",
                p.id,
                p.name,
                format_currency(p.price)
            )?;
        }
        writeln!(
            out,
            "Quantity: {} | Total: {}",
            self.form.quantity,
            format_currency(preview_total(products, &self.form.into()))
        )?;
        writeln!(out)?;

        writeln!(out, "Recent Sales")?;
        let limit = usize::try_from(self.recent_limit).unwrap_or(usize::MAX);
        if sales.is_empty() {
            writeln!(out, "No sales recorded yet.")?;
        }
        for s in sales.iter().take(limit) {
            writeln!(
                out,
                "{} | {} | {} | {}",
                s.product_name,
                s.quantity,
                format_currency(s.total),
                format_date(&s.timestamp, &now.timezone())
            )?;
        }

        Ok(out)
    }
}

/// Renders a chart series as labeled horizontal bars.
pub fn render_chart(series: &ChartSeries) -> Result<String> {
    let mut out = String::new();
    let tabs: Vec<String> = Period::ALL
        .iter()
        .map(|p| {
            if *p == series.period {
                format!("[{}]", p.as_str())
            } else {
                p.as_str().to_string()
            }
        })
        .collect();

    writeln!(out, "{}  ({})", series.period.title(), tabs.join(" "))?;
    let peak = series.peak();
    let label_width = series
        .buckets
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    for bucket in &series.buckets {
        writeln!(
            out,
            "{:>label_width$} {} {}",
            bucket.label,
            format_bar(bucket.total, peak, CHART_WIDTH),
            format_currency(bucket.total)
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::product::get_product_by_id,
        test_utils::{create_test_product, setup_test_db},
    };

    #[tokio::test]
    async fn test_submit_success_resets_form() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Speaker", 30.0, 5, 2).await?;

        let mut view = SalesView::new(Period::Daily7, 10);
        view.select_product(Some(product.id));
        view.set_quantity(2);

        let sale = view.submit(&db, Utc::now()).await?.unwrap();
        assert_eq!(sale.quantity, 2);
        assert_eq!(view.form, SaleForm::default());
        assert_eq!(
            view.status,
            Some(SaleStatus {
                success: true,
                message: "Sale completed successfully!".to_string()
            })
        );
        assert_eq!(get_product_by_id(&db, product.id).await?.unwrap().stock, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Speaker", 30.0, 1, 2).await?;

        let mut view = SalesView::new(Period::Daily7, 10);
        assert!(view.submit(&db, Utc::now()).await?.is_none());
        assert_eq!(view.status.as_ref().unwrap().message, "Please select a product");

        view.select_product(Some(product.id));
        view.set_quantity(4);
        assert!(view.submit(&db, Utc::now()).await?.is_none());
        let status = view.status.clone().unwrap();
        assert!(!status.success);
        assert_eq!(status.message, "Not enough stock available");
        assert_eq!(view.form.quantity, 4);

        view.clear_status();
        assert!(view.status.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_render_lists_recent_sales() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Speaker", 30.0, 5, 2).await?;
        let mut view = SalesView::new(Period::Hourly24, 1);
        view.select_product(Some(product.id));
        view.submit(&db, Utc::now()).await?;
        view.select_product(Some(product.id));
        view.submit(&db, Utc::now()).await?;

        let text = view.render(&db, &Utc::now()).await?;
        assert!(text.contains("Total Sales: $60.00 | Items Sold: 2 | Average Sale: $30.00"));
        assert!(text.contains("Sales Overview - Last 24 Hours  ([day] week month)"));
        assert!(text.contains("Speaker ($30.00) - 3 in stock"));
        assert_eq!(text.matches("Speaker | 1 | $30.00").count(), 1);

        Ok(())
    }

    #[test]
    fn test_render_chart_shows_every_bucket() -> Result<()> {
        let series = aggregate_sales(&[], Period::Weekly4, &Utc::now());
        let text = render_chart(&series)?;
        assert_eq!(text.lines().count(), 1 + Period::Weekly4.bucket_count());
        assert!(text.contains("[month]"));
        Ok(())
    }
}
