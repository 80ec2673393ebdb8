// ==========================================
// 测试数据构建器 - 房源抽取记录
// ==========================================
// 一个 ListingBuilder 同时产出业绩/价格/位置三张表中的对应行
// ExtractFixture 可直接生成 ExtractSet, 也可写出抽取表 CSV（抽取查询原始列名）
// ==========================================

use chrono::NaiveDate;
use csv::Writer;
use meta_performance::domain::listing::{
    ExtractSet, LocationRecord, MinPriceRecord, PerformanceRecord, PriceRecord,
};
use meta_performance::importer::extract_names;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// 抽取查询原始列名
const PERFORMANCE_HEADER: [&str; 13] = [
    "listing",
    "group_name",
    "num_listing_blocked",
    "n_days_status",
    "listing_fat",
    "n_competitors",
    "meta_value",
    "year_month",
    "to_listings",
    "to_competitors",
    "dias_ocupados",
    "total_dias",
    "data_da_execucao",
];
const PRICE_HEADER: [&str; 4] = [
    "listing",
    "media_preco_ocupado",
    "media_preco_disponivel",
    "ocupacao_ainda_disponivel",
];
const LOCATION_HEADER: [&str; 5] = ["listing", "carteira", "estado", "cidade", "Bairro"];
const MIN_PRICE_HEADER: [&str; 2] = ["listing", "n_dates_special_price"];

// ==========================================
// ListingBuilder
// ==========================================

#[derive(Debug, Clone)]
pub struct ListingBuilder {
    listing_id: String,
    group_name: Option<String>,
    blocked_days: Option<i64>,
    revenue_month: Option<f64>,
    target: Option<f64>,
    occupancy_rate: Option<f64>,
    execution_date: Option<NaiveDate>,
    avg_price_occupied: Option<f64>,
    avg_price_available: Option<f64>,
    days_available_raw: Option<i64>,
    city: Option<String>,
    min_price_days: Option<i64>,
}

impl ListingBuilder {
    /// 默认: 目标 10000, 入住率 0.5, 可售均价 300, 原始可售 12 天
    pub fn new(listing_id: &str) -> Self {
        Self {
            listing_id: listing_id.to_string(),
            group_name: Some("Studio".to_string()),
            blocked_days: Some(0),
            revenue_month: Some(9000.0),
            target: Some(10000.0),
            occupancy_rate: Some(0.5),
            execution_date: None,
            avg_price_occupied: Some(250.0),
            avg_price_available: Some(300.0),
            days_available_raw: Some(12),
            city: None,
            min_price_days: None,
        }
    }

    pub fn revenue(mut self, revenue: f64) -> Self {
        self.revenue_month = Some(revenue);
        self
    }

    pub fn target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    pub fn occupancy(mut self, rate: Option<f64>) -> Self {
        self.occupancy_rate = rate;
        self
    }

    pub fn executed_on(mut self, date: NaiveDate) -> Self {
        self.execution_date = Some(date);
        self
    }

    pub fn available_price(mut self, price: Option<f64>) -> Self {
        self.avg_price_available = price;
        self
    }

    pub fn days_available_raw(mut self, days: i64) -> Self {
        self.days_available_raw = Some(days);
        self
    }

    pub fn blocked(mut self, days: i64, avg_price_occupied: f64) -> Self {
        self.blocked_days = Some(days);
        self.avg_price_occupied = Some(avg_price_occupied);
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn min_price_days(mut self, days: i64) -> Self {
        self.min_price_days = Some(days);
        self
    }

    pub fn performance(&self) -> PerformanceRecord {
        PerformanceRecord {
            listing_id: self.listing_id.clone(),
            group_name: self.group_name.clone(),
            blocked_days: self.blocked_days,
            days_active: Some(30),
            revenue_month: self.revenue_month,
            n_competitors: Some(8),
            target: self.target,
            year_month: self.execution_date.map(|d| d.format("%Y-%m").to_string()),
            occupancy_rate: self.occupancy_rate,
            competitor_occupancy_rate: Some(0.6),
            days_occupied: Some(15),
            total_days: Some(30),
            execution_date: self.execution_date,
        }
    }

    pub fn price(&self) -> PriceRecord {
        PriceRecord {
            listing_id: self.listing_id.clone(),
            avg_price_occupied: self.avg_price_occupied,
            avg_price_available: self.avg_price_available,
            days_available_raw: self.days_available_raw,
        }
    }

    pub fn location(&self) -> LocationRecord {
        LocationRecord {
            listing_id: self.listing_id.clone(),
            portfolio: Some("Carteira Sul".to_string()),
            state: Some("SC".to_string()),
            city: self.city.clone(),
            neighborhood: None,
        }
    }

    fn performance_cells(&self) -> Vec<String> {
        let p = self.performance();
        vec![
            p.listing_id,
            opt(p.group_name),
            opt(p.blocked_days),
            opt(p.days_active),
            opt(p.revenue_month),
            opt(p.n_competitors),
            opt(p.target),
            opt(p.year_month),
            opt(p.occupancy_rate),
            opt(p.competitor_occupancy_rate),
            opt(p.days_occupied),
            opt(p.total_days),
            opt(p.execution_date),
        ]
    }

    fn price_cells(&self) -> Vec<String> {
        let p = self.price();
        vec![
            p.listing_id,
            opt(p.avg_price_occupied),
            opt(p.avg_price_available),
            opt(p.days_available_raw),
        ]
    }

    fn location_cells(&self) -> Vec<String> {
        let l = self.location();
        vec![
            l.listing_id,
            opt(l.portfolio),
            opt(l.state),
            opt(l.city),
            opt(l.neighborhood),
        ]
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ==========================================
// ExtractFixture
// ==========================================

#[derive(Debug, Clone, Default)]
pub struct ExtractFixture {
    pub listings: Vec<ListingBuilder>,
    pub with_min_price: bool,
}

impl ExtractFixture {
    pub fn new(listings: Vec<ListingBuilder>) -> Self {
        Self {
            listings,
            with_min_price: false,
        }
    }

    pub fn with_min_price(mut self) -> Self {
        self.with_min_price = true;
        self
    }

    pub fn extract_set(&self) -> ExtractSet {
        ExtractSet {
            performance: self.listings.iter().map(ListingBuilder::performance).collect(),
            prices: self.listings.iter().map(ListingBuilder::price).collect(),
            locations: self.listings.iter().map(ListingBuilder::location).collect(),
            min_prices: self.with_min_price.then(|| {
                self.listings
                    .iter()
                    .map(|l| MinPriceRecord {
                        listing_id: l.listing_id.clone(),
                        min_price_days: l.min_price_days,
                    })
                    .collect()
            }),
        }
    }

    /// 写出抽取表 CSV, 返回业绩表路径
    pub fn write_csv(&self, raw_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
        std::fs::create_dir_all(raw_dir)?;

        let performance = extract_path(raw_dir, extract_names::PERFORMANCE);
        write_file(
            &performance,
            &PERFORMANCE_HEADER,
            self.listings.iter().map(ListingBuilder::performance_cells),
        )?;
        write_file(
            &extract_path(raw_dir, extract_names::PRICE),
            &PRICE_HEADER,
            self.listings.iter().map(ListingBuilder::price_cells),
        )?;
        write_file(
            &extract_path(raw_dir, extract_names::LOCATION),
            &LOCATION_HEADER,
            self.listings.iter().map(ListingBuilder::location_cells),
        )?;
        if self.with_min_price {
            write_file(
                &extract_path(raw_dir, extract_names::MIN_PRICE),
                &MIN_PRICE_HEADER,
                self.listings
                    .iter()
                    .map(|l| vec![l.listing_id.clone(), opt(l.min_price_days)]),
            )?;
        }
        Ok(performance)
    }
}

pub fn extract_path(raw_dir: &Path, base_name: &str) -> PathBuf {
    raw_dir.join(format!("{}.csv", base_name))
}

fn write_file<I>(path: &Path, header: &[&str], rows: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut writer = Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 向已有 CSV 追加一行原始单元格
pub fn append_row(path: &Path, cells: &[&str]) -> Result<(), Box<dyn Error>> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "{}", cells.join(","))?;
    Ok(())
}
