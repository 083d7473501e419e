/*!
 * Localized user-facing messages
 */

use clap::ValueEnum;

/// Language of console messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// English
    #[default]
    En,
    /// Vietnamese
    Vi,
}

/// Console messages in one language
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    lang: Language,
}

impl Messages {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn app_title(&self) -> &'static str {
        "🔍 HIDDENDUMP"
    }

    pub fn analyzing(&self, path: &str) -> String {
        match self.lang {
            Language::En => format!("🔍 Analyzing project at: {}", path),
            Language::Vi => format!("🔍 Đang phân tích dự án tại: {}", path),
        }
    }

    pub fn scanning(&self) -> &'static str {
        match self.lang {
            Language::En => "🔍 Scanning directories...",
            Language::Vi => "🔍 Đang quét thư mục...",
        }
    }

    /// File patterns in effect, in sorted order
    pub fn included_types<I, S>(&self, patterns: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.lang {
            Language::En => format!("📁 File types included: {}", list),
            Language::Vi => format!("📁 Các loại tệp sẽ được bao gồm: {}", list),
        }
    }

    pub fn generating_tree(&self) -> &'static str {
        match self.lang {
            Language::En => "📁 Generating directory tree...",
            Language::Vi => "📁 Đang tạo cây thư mục...",
        }
    }

    pub fn processing_files(&self) -> &'static str {
        match self.lang {
            Language::En => "📄 Processing hidden files...",
            Language::Vi => "📄 Đang xử lý các tệp ẩn...",
        }
    }

    pub fn processing(&self, file: &str) -> String {
        match self.lang {
            Language::En => format!("📝 Processing: {}", file),
            Language::Vi => format!("📝 Xử lý: {}", file),
        }
    }

    pub fn skip_large(&self, file: &str, size: u64, limit: u64) -> String {
        match self.lang {
            Language::En => format!(
                "⚠️  Skipping {} (size {} bytes > limit {} bytes)",
                file, size, limit
            ),
            Language::Vi => format!(
                "⚠️  Bỏ qua {} (kích thước {} byte > giới hạn {} byte)",
                file, size, limit
            ),
        }
    }

    pub fn skip_binary(&self, file: &str) -> String {
        match self.lang {
            Language::En => format!("🚫 Skipping {} (binary file)", file),
            Language::Vi => format!("🚫 Bỏ qua {} (tệp nhị phân)", file),
        }
    }

    pub fn dry_run_header(&self) -> &'static str {
        match self.lang {
            Language::En => "🔍 DRY RUN - Files that would be processed:",
            Language::Vi => "🔍 CHẠY THỬ - Các tệp sẽ được xử lý:",
        }
    }

    pub fn success(&self, output: &str) -> String {
        match self.lang {
            Language::En => format!("✅ Success! File created: {}", output),
            Language::Vi => format!("✅ Thành công! Đã tạo file: {}", output),
        }
    }

    pub fn summary(&self) -> &'static str {
        match self.lang {
            Language::En => "📊 Summary",
            Language::Vi => "📊 Thống kê",
        }
    }

    pub fn files_processed(&self) -> &'static str {
        match self.lang {
            Language::En => "📄 Files processed",
            Language::Vi => "📄 Số file đã xử lý",
        }
    }

    pub fn total_size(&self) -> &'static str {
        match self.lang {
            Language::En => "📦 Total size",
            Language::Vi => "📦 Tổng kích thước",
        }
    }

    pub fn total_lines(&self) -> &'static str {
        match self.lang {
            Language::En => "📝 Total lines",
            Language::Vi => "📝 Tổng số dòng",
        }
    }

    pub fn skipped(&self) -> &'static str {
        match self.lang {
            Language::En => "⏭️ Skipped (large / binary)",
            Language::Vi => "⏭️ Bỏ qua (lớn / nhị phân)",
        }
    }

    pub fn read_errors(&self) -> &'static str {
        match self.lang {
            Language::En => "❌ Read errors",
            Language::Vi => "❌ Lỗi đọc",
        }
    }

    pub fn output_file(&self) -> &'static str {
        match self.lang {
            Language::En => "📂 Output file",
            Language::Vi => "📂 File đầu ra",
        }
    }

    pub fn process_time(&self) -> &'static str {
        match self.lang {
            Language::En => "⏱️ Process time",
            Language::Vi => "⏱️ Thời gian xử lý",
        }
    }

    pub fn processed_files_title(&self) -> &'static str {
        match self.lang {
            Language::En => "📋  PROCESSED FILES",
            Language::Vi => "📋  CÁC TỆP ĐÃ XỬ LÝ",
        }
    }

    pub fn largest_files_title(&self) -> &'static str {
        match self.lang {
            Language::En => "📋  TOP 10 LARGEST FILES",
            Language::Vi => "📋  10 TỆP LỚN NHẤT",
        }
    }

    pub fn write_error(&self, error: &str) -> String {
        match self.lang {
            Language::En => format!("❌ Error writing file: {}", error),
            Language::Vi => format!("❌ Lỗi ghi file: {}", error),
        }
    }

    pub fn not_found(&self, path: &str) -> String {
        match self.lang {
            Language::En => format!("❌ Error: Folder '{}' not found!", path),
            Language::Vi => format!("❌ Lỗi: Thư mục '{}' không tồn tại!", path),
        }
    }

    pub fn root_warning(&self) -> &'static str {
        match self.lang {
            Language::En => "⚠️  Warning: You are about to scan the entire root filesystem. This may take a very long time and consume significant resources. Continue? (y/N): ",
            Language::Vi => "⚠️  Cảnh báo: Bạn sắp quét toàn bộ hệ thống tệp gốc. Việc này có thể mất rất nhiều thời gian và tài nguyên. Tiếp tục? (y/N): ",
        }
    }

    pub fn cancelled(&self) -> &'static str {
        match self.lang {
            Language::En => "❌ Scan cancelled by user.",
            Language::Vi => "❌ Người dùng đã hủy quét.",
        }
    }

    pub fn done(&self, output: Option<&str>) -> String {
        match (self.lang, output) {
            (Language::En, Some(name)) => format!("🎉 Done! The {} file is ready.", name),
            (Language::En, None) => "🎉 Done!".to_string(),
            (Language::Vi, Some(name)) => format!("🎉 Hoàn thành! File {} đã sẵn sàng.", name),
            (Language::Vi, None) => "🎉 Hoàn thành!".to_string(),
        }
    }

    pub fn failed(&self) -> &'static str {
        match self.lang {
            Language::En => "💥 An error occurred during processing.",
            Language::Vi => "💥 Có lỗi xảy ra trong quá trình xử lý.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_follow_language() {
        let en = Messages::new(Language::En);
        let vi = Messages::new(Language::Vi);
        assert_eq!(en.skip_binary("a.bin"), "🚫 Skipping a.bin (binary file)");
        assert_eq!(vi.skip_binary("a.bin"), "🚫 Bỏ qua a.bin (tệp nhị phân)");
        assert!(en.not_found("/x").contains("'/x'"));
        assert_eq!(en.app_title(), vi.app_title());
        assert_eq!(
            en.included_types(["*.log", ".env"]),
            "📁 File types included: *.log, .env"
        );
        assert!(vi.included_types(["*.ini"]).ends_with("bao gồm: *.ini"));
    }
}
