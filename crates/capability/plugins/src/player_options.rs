//! 视频播放器选项覆盖。
//!
//! 条目页（含子片段页、分享页）通过 `MediaViewVideoPlayerOptionsJS` 注入脚本，
//! 脚本内可直接修改 `playerOptions`；标注工具通过 `AnnotationViewJS` 注入完整的 `<script>`。

use crate::block::{BlockOutput, BlockPlugin};

pub const MEDIA_VIEW_PLAYER_OPTIONS_JS: &str = "MediaViewVideoPlayerOptionsJS";
pub const ANNOTATION_VIEW_JS: &str = "AnnotationViewJS";

const CUSTOM_SUBTITLES_JS: &str = r#"
            // ItemPageCustomSubtitles: override subtitles with a hardcoded WEBVTT source
            playerOptions.timeline[0].textTracks = [
                {
                    code: "de",
                    kind: "subtitles",
                    name: gettext("German"),
                    url: "/vs/item/download/VX-4/?shape=VX-6"
                },
                {
                    name: gettext("Disabled")
                }
            ];
"#;

const DISABLE_SUBTITLES_JS: &str = r#"
            // ItemPageDisableSubtitles: remove textTracks from player
            playerOptions.timeline[0].textTracks = null;
"#;

const DISABLE_CREATE_POSTER_JS: &str = r#"
            // ItemPageDisableCreatePoster: disable poster creation from video player
            playerOptions.grabStills = false;
"#;

const ANNOTATION_CUSTOM_SUBTITLES_JS: &str = r#"
            <script>
                $(document).ready(function() {
                    cntmo.app.annotationTool.playerOptionHandler = function(playerOptions) {
                        playerOptions.timeline[0].textTracks = [
                            {
                                code: "de",
                                kind: "subtitles",
                                name: gettext("German"),
                                url: "/vs/item/download/VX-4/?shape=VX-6"
                            },
                            {
                                name: gettext("Disabled")
                            }
                        ];
                        return playerOptions;
                    }
                });
            </script>
"#;

fn script(guid: &str, body: &str) -> BlockOutput {
    BlockOutput::Script {
        guid: guid.to_string(),
        string: body.to_string(),
    }
}

/// 为条目页播放器加入固定的字幕源。
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPageCustomSubtitles;

impl BlockPlugin for ItemPageCustomSubtitles {
    fn name(&self) -> &str {
        MEDIA_VIEW_PLAYER_OPTIONS_JS
    }

    fn plugin_guid(&self) -> &str {
        "bf729d14-caa1-4978-96c8-0927361bcb07"
    }

    fn render(&self, _theme: Option<&str>) -> BlockOutput {
        script(self.plugin_guid(), CUSTOM_SUBTITLES_JS)
    }
}

/// 关闭条目页字幕。
///
/// 与 [`ItemPageCustomSubtitles`] 互斥，默认不注册。
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPageDisableSubtitles;

impl BlockPlugin for ItemPageDisableSubtitles {
    fn name(&self) -> &str {
        MEDIA_VIEW_PLAYER_OPTIONS_JS
    }

    fn plugin_guid(&self) -> &str {
        "dbee3017-a8ff-4b90-bbb2-e9f77f0e12e6"
    }

    fn render(&self, _theme: Option<&str>) -> BlockOutput {
        script(self.plugin_guid(), DISABLE_SUBTITLES_JS)
    }
}

/// 隐藏播放器上的截帧（海报）按钮。
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPageDisableCreatePoster;

impl BlockPlugin for ItemPageDisableCreatePoster {
    fn name(&self) -> &str {
        MEDIA_VIEW_PLAYER_OPTIONS_JS
    }

    fn plugin_guid(&self) -> &str {
        "8c7eb227-c0c4-42ad-83b9-257569fe11fc"
    }

    fn render(&self, _theme: Option<&str>) -> BlockOutput {
        script(self.plugin_guid(), DISABLE_CREATE_POSTER_JS)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationToolCustomSubtitles;

impl BlockPlugin for AnnotationToolCustomSubtitles {
    fn name(&self) -> &str {
        ANNOTATION_VIEW_JS
    }

    fn plugin_guid(&self) -> &str {
        "66fcdc0c-b89d-4c4a-8578-04a8d829ae0f"
    }

    fn render(&self, _theme: Option<&str>) -> BlockOutput {
        script(self.plugin_guid(), ANNOTATION_CUSTOM_SUBTITLES_JS)
    }
}
