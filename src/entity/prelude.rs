//! 预导入模块，方便使用

pub use super::class_videos::{
    ActiveModel as ClassVideoActiveModel, Entity as ClassVideos, Model as ClassVideoModel,
};
pub use super::professor_qr_tokens::{
    ActiveModel as QrTokenActiveModel, Entity as ProfessorQrTokens, Model as QrTokenModel,
};
pub use super::professors::{
    ActiveModel as ProfessorActiveModel, Entity as Professors, Model as ProfessorModel,
};
pub use super::repository_documents::{
    ActiveModel as DocumentActiveModel, Entity as RepositoryDocuments, Model as DocumentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teacher_evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as TeacherEvaluations,
    Model as EvaluationModel,
};
