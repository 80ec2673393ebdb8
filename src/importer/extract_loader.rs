// ==========================================
// 房源目标达成分析系统 - 抽取表加载器
// ==========================================
// 职责: 在原始目录中定位抽取表并加载为 ExtractSet
// 流程: 定位 → 解析 → 映射/清洗 → DQ 汇总
// 红线: 三张必需表任一缺失 → MissingInput（致命）
// 红线: 最低价补充表缺失或不可读 → 仅告警, 输出不含 min_price_days 列
// ==========================================

use crate::domain::listing::{ExtractSet, MinPriceRecord};
use crate::importer::dq_report::DqReport;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::extract_trait::{FieldMapper, FileParser, RawRow};
use crate::importer::field_mapper::{extract_labels, FieldMapper as FieldMapperImpl};
use crate::importer::file_parser::{UniversalFileParser, SUPPORTED_EXTENSIONS};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// 抽取表文件基名（不含扩展名）
pub mod extract_names {
    pub const PERFORMANCE: &str = "meta_analysis_performance_value_meta";
    pub const PRICE: &str = "meta_analysis_price";
    pub const LOCATION: &str = "meta_analysis_location";
    pub const MIN_PRICE: &str = "meta_analysis_pmin";

    pub const REQUIRED: [&str; 3] = [PERFORMANCE, PRICE, LOCATION];
}

/// 本次加载实际使用的文件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractSources {
    pub performance: PathBuf,
    pub price: PathBuf,
    pub location: PathBuf,
    pub min_price: Option<PathBuf>,
}

/// 加载结果
#[derive(Debug, Clone, Default)]
pub struct LoadedExtracts {
    pub extracts: ExtractSet,
    pub sources: ExtractSources,
    pub dq: DqReport,
}

// ==========================================
// ExtractLoader - 抽取表加载器
// ==========================================
pub struct ExtractLoader {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl ExtractLoader {
    pub fn new() -> Self {
        Self::with_components(Box::new(UniversalFileParser), Box::new(FieldMapperImpl::new()))
    }

    /// 注入自定义解析器/映射器
    pub fn with_components(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 定位抽取表（.csv 优先于 .xlsx/.xls）
    pub fn locate(raw_dir: &Path, base_name: &str) -> Option<PathBuf> {
        SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| raw_dir.join(format!("{}.{}", base_name, ext)))
            .find(|path| path.is_file())
    }

    /// 从原始目录加载全部抽取表
    #[instrument(skip(self, raw_dir), fields(raw_dir = %raw_dir.display()))]
    pub fn load(&self, raw_dir: &Path) -> ImportResult<LoadedExtracts> {
        let sources = Self::resolve_sources(raw_dir)?;
        info!(
            performance = %sources.performance.display(),
            price = %sources.price.display(),
            location = %sources.location.display(),
            min_price = ?sources.min_price,
            "抽取表定位完成"
        );

        let mut dq = DqReport::default();

        let performance = self.load_rows(
            &sources.performance,
            extract_labels::PERFORMANCE,
            &mut dq,
            |mapper, row, n, report| mapper.map_performance(row, n, report),
        )?;
        let prices = self.load_rows(
            &sources.price,
            extract_labels::PRICE,
            &mut dq,
            |mapper, row, n, report| mapper.map_price(row, n, report),
        )?;
        let locations = self.load_rows(
            &sources.location,
            extract_labels::LOCATION,
            &mut dq,
            |mapper, row, n, report| mapper.map_location(row, n, report),
        )?;
        let min_prices = self.load_min_prices(sources.min_price.as_deref(), &mut dq);

        for (field, count) in dq.warnings_by_field() {
            warn!(field = %field, count, "数值无法解析, 已按空值处理");
        }
        if dq.dropped_count() > 0 {
            warn!(dropped = dq.dropped_count(), "缺少 listing_id 的行已丢弃");
        }
        info!(
            performance = performance.len(),
            prices = prices.len(),
            locations = locations.len(),
            min_prices = ?min_prices.as_ref().map(Vec::len),
            "抽取表加载完成"
        );

        Ok(LoadedExtracts {
            extracts: ExtractSet {
                performance,
                prices,
                locations,
                min_prices,
            },
            sources,
            dq,
        })
    }

    fn resolve_sources(raw_dir: &Path) -> ImportResult<ExtractSources> {
        let missing: Vec<String> = extract_names::REQUIRED
            .iter()
            .filter(|name| Self::locate(raw_dir, name).is_none())
            .map(|name| raw_dir.join(format!("{}.csv", name)).display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::missing_input(missing.join(", ")));
        }

        let required = |name: &str| {
            Self::locate(raw_dir, name)
                .ok_or_else(|| ImportError::missing_input(raw_dir.join(name).display().to_string()))
        };
        let min_price = Self::locate(raw_dir, extract_names::MIN_PRICE);
        if min_price.is_none() {
            warn!(
                file = extract_names::MIN_PRICE,
                "未找到最低价补充表, 输出将不含 min_price_days 列"
            );
        }

        Ok(ExtractSources {
            performance: required(extract_names::PERFORMANCE)?,
            price: required(extract_names::PRICE)?,
            location: required(extract_names::LOCATION)?,
            min_price,
        })
    }

    /// 解析 + 逐行映射
    fn load_rows<T, F>(
        &self,
        path: &Path,
        extract: &str,
        dq: &mut DqReport,
        map: F,
    ) -> ImportResult<Vec<T>>
    where
        F: Fn(&dyn FieldMapper, &RawRow, usize, &mut DqReport) -> Option<T>,
    {
        let raw_rows = self.file_parser.parse_to_raw_records(path)?;
        let mut report = DqReport {
            rows_read: raw_rows.len(),
            ..DqReport::default()
        };

        let records: Vec<T> = raw_rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| map(self.field_mapper.as_ref(), row, idx + 1, &mut report))
            .collect();
        report.rows_loaded = records.len();

        debug!(
            extract,
            rows_read = report.rows_read,
            rows_loaded = report.rows_loaded,
            "抽取表解析完成"
        );
        dq.absorb(report);
        Ok(records)
    }

    fn load_min_prices(
        &self,
        path: Option<&Path>,
        dq: &mut DqReport,
    ) -> Option<Vec<MinPriceRecord>> {
        let path = path?;
        let loaded = self.load_rows(
            path,
            extract_labels::MIN_PRICE,
            dq,
            |mapper, row, n, report| mapper.map_min_price(row, n, report),
        );
        match loaded {
            Ok(rows) => Some(rows),
            Err(err) => {
                warn!(error = %err, "最低价补充表读取失败, 输出将不含 min_price_days 列");
                None
            }
        }
    }
}

impl Default for ExtractLoader {
    fn default() -> Self {
        Self::new()
    }
}
