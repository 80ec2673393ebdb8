// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成一组确定性的抽取表样例（抽取查询原始列名）
// 输出: {raw_dir}/meta_analysis_*.csv, 默认 data/raw
// 用法: cargo run --bin generate_test_data -- [raw_dir] [YYYY-MM-DD] [listings]
// ==========================================

use chrono::NaiveDate;
use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::Path;

const PERFORMANCE_HEADER: &[&str] = &[
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
const PRICE_HEADER: &[&str] = &[
    "listing",
    "media_preco_ocupado",
    "media_preco_disponivel",
    "ocupacao_ainda_disponivel",
];
const LOCATION_HEADER: &[&str] = &["listing", "carteira", "estado", "cidade", "Bairro"];
const MIN_PRICE_HEADER: &[&str] = &["listing", "n_dates_special_price"];

const GROUPS: [&str; 4] = ["Studio", "1Q", "2Q", "Casa"];
const CITIES: [(&str, &str, &str); 4] = [
    ("SC", "Florianópolis", "Jurerê"),
    ("RJ", "Rio de Janeiro", "Copacabana"),
    ("SP", "São Paulo", "Pinheiros"),
    ("BA", "Salvador", "Barra"),
];
// 达成率分布覆盖五个分组, 观察名单占多数
const RATIOS: [f64; 10] = [0.35, 0.62, 0.8, 0.84, 0.91, 0.97, 1.02, 1.08, 1.45, 2.3];

/// 单个样例房源
struct SampleListing {
    id: String,
    index: usize,
    revenue: f64,
    target: f64,
}

impl SampleListing {
    fn new(index: usize) -> Self {
        // 每 17 个房源一个无目标房源
        let target = if index % 17 == 16 {
            0.0
        } else {
            6000.0 + (index % 9) as f64 * 1000.0
        };
        let ratio = RATIOS[index % RATIOS.len()];
        Self {
            id: format!("LST{:04}", index + 1),
            index,
            revenue: (target.max(8000.0) * ratio).round(),
            target,
        }
    }

    fn performance_row(&self, date: NaiveDate) -> Vec<String> {
        let i = self.index;
        vec![
            self.id.clone(),
            GROUPS[i % GROUPS.len()].to_string(),
            (i % 4).to_string(),
            "30".to_string(),
            self.revenue.to_string(),
            (5 + i % 7).to_string(),
            self.target.to_string(),
            date.format("%Y-%m").to_string(),
            // 每 11 个房源一个入住率缺失
            if i % 11 == 10 {
                String::new()
            } else {
                format!("{:.2}", 0.35 + (i % 6) as f64 * 0.1)
            },
            format!("{:.2}", 0.5 + (i % 4) as f64 * 0.05),
            (10 + i % 15).to_string(),
            "30".to_string(),
            date.to_string(),
        ]
    }

    fn price_row(&self) -> Vec<String> {
        let i = self.index;
        vec![
            self.id.clone(),
            (180 + (i % 8) * 20).to_string(),
            (200 + (i % 10) * 25).to_string(),
            (i % 16).to_string(),
        ]
    }

    fn location_row(&self) -> Vec<String> {
        let (state, city, neighborhood) = CITIES[self.index % CITIES.len()];
        vec![
            self.id.clone(),
            format!("Carteira {}", 1 + self.index % 3),
            state.to_string(),
            city.to_string(),
            neighborhood.to_string(),
        ]
    }

    fn min_price_row(&self) -> Vec<String> {
        vec![self.id.clone(), (self.index % 5).to_string()]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let raw_dir = args.next().unwrap_or_else(|| "data/raw".to_string());
    let date = match args.next() {
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")?,
        None => NaiveDate::from_ymd_opt(2025, 9, 25).ok_or("invalid default date")?,
    };
    let count: usize = match args.next() {
        Some(value) => value.parse()?,
        None => 60,
    };

    println!("开始生成抽取表样例...");
    let raw_dir = Path::new(&raw_dir);
    fs::create_dir_all(raw_dir)?;

    let listings: Vec<SampleListing> = (0..count).map(SampleListing::new).collect();

    write_extract(
        &raw_dir.join("meta_analysis_performance_value_meta.csv"),
        PERFORMANCE_HEADER,
        listings.iter().map(|l| l.performance_row(date)),
    )?;
    // 每 13 个房源缺一条价格记录（左连接后价格为空）
    write_extract(
        &raw_dir.join("meta_analysis_price.csv"),
        PRICE_HEADER,
        listings
            .iter()
            .filter(|l| l.index % 13 != 12)
            .map(SampleListing::price_row),
    )?;
    write_extract(
        &raw_dir.join("meta_analysis_location.csv"),
        LOCATION_HEADER,
        listings.iter().map(SampleListing::location_row),
    )?;
    write_extract(
        &raw_dir.join("meta_analysis_pmin.csv"),
        MIN_PRICE_HEADER,
        listings.iter().map(SampleListing::min_price_row),
    )?;

    println!("✓ 已生成 {} 个房源的抽取表 → {}", count, raw_dir.display());
    Ok(())
}

fn write_extract<I>(path: &Path, header: &[&str], rows: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(header)?;
    let mut written = 0;
    for row in rows {
        wtr.write_record(&row)?;
        written += 1;
    }
    wtr.flush()?;
    println!("✓ 生成 {} ({}条)", path.display(), written);
    Ok(())
}
