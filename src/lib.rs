// 电影浏览客户端库
//
// 本库提供浏览客户端的核心功能，包括：
// - TMDB discover / search 请求构建与执行
// - 筛选、排序、分页状态与请求序号
// - 收藏列表与详情视图
// - 终端命令解析与渲染

pub mod config;
pub mod external;
pub mod models;
pub mod services;
pub mod ui;
