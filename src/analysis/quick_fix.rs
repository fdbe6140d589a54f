//! 快速修复：每个类别至多一条诊断命令，没有即不显示

use serde::Serialize;

use crate::analysis::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickFix {
    pub category: Category,
    pub command: &'static str,
}

const QUICK_FIXES: &[QuickFix] = &[
    QuickFix {
        category: Category::Dns,
        command: "ipconfig /flushdns",
    },
    QuickFix {
        category: Category::Ssl,
        command: "openssl s_client -connect example.com:443",
    },
    QuickFix {
        category: Category::Connection,
        command: "ping -c 4 8.8.8.8",
    },
];

pub fn quick_fix_for(category: Category) -> Option<QuickFix> {
    QUICK_FIXES.iter().find(|f| f.category == category).copied()
}
