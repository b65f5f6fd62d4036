use serde_json::json;

pub const TOOL_BUILD_PPT: &str = "build_ppt";
pub const TOOL_QUERY_PPT: &str = "query_ppt";
pub const TOOL_DOWNLOAD_PPT: &str = "download_ppt";
pub const TOOL_EDITOR_PPT: &str = "editor_ppt";

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const BUILD_PPT_DESCRIPTION: &str = "根据描述的文本或markdown，执行生成任务。当返回PPT-ID时，表示生成任务成功，可以调用query_ppt工具查询生成进度";

pub const QUERY_PPT_DESCRIPTION: &str = "根据PPT任务ID查询异步生成结果，status=1表示还在生成中，应该继续轮训该查询，status=2表示成功，status=3表示失败；process_url表示预览的url地址，不断轮训请求直至成功或失败;\n        当成功后使用默认浏览器打开ppt地址并下载PPT和生成编辑器地址；";

pub const DOWNLOAD_PPT_DESCRIPTION: &str = "根据PPT任务ID生成 PPT 下载地址";

pub const EDITOR_PPT_DESCRIPTION: &str = "根据PPT任务ID生成PPT编辑器界面URL";

fn single_string_schema(field: &str, description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            field: {
                "type": "string",
                "description": description
            }
        },
        "required": [field]
    })
}

pub fn build_ppt_schema() -> serde_json::Value {
    single_string_schema("text", "输入描述的文本或markdown，生成PPT")
}

pub fn query_ppt_schema() -> serde_json::Value {
    single_string_schema("ppt_id", "PPT-ID")
}

pub fn download_ppt_schema() -> serde_json::Value {
    single_string_schema("id", "PPT-ID")
}

pub fn editor_ppt_schema() -> serde_json::Value {
    single_string_schema("id", "PPT-ID")
}
