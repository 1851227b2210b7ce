use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::Cedula)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Phone).string_len(20).null())
                    .col(ColumnDef::new(Students::BirthDate).string_len(10).null())
                    .col(ColumnDef::new(Students::Address).text().null())
                    .col(ColumnDef::new(Students::Semester).integer().not_null())
                    .col(ColumnDef::new(Students::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Students::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Professors::Cedula)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professors::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Professors::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Professors::Email)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professors::Phone).string_len(20).null())
                    .col(
                        ColumnDef::new(Professors::Department)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professors::Subjects).text().null())
                    .col(ColumnDef::new(Professors::ExperienceYears).integer().null())
                    .col(
                        ColumnDef::new(Professors::AcademicTitle)
                            .string_len(200)
                            .null(),
                    )
                    .col(ColumnDef::new(Professors::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Professors::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professors::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教学评价表
        manager
            .create_table(
                Table::create()
                    .table(TeacherEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::SubjectMastery)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::ExplanationClarity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::Punctuality)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::Availability)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::Methodology)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::Overall)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherEvaluations::PositiveAspects).text().null())
                    .col(
                        ColumnDef::new(TeacherEvaluations::ImprovementAspects)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(TeacherEvaluations::GeneralComments).text().null())
                    .col(
                        ColumnDef::new(TeacherEvaluations::Recommendation)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::Semester)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::AcademicPeriod)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherEvaluations::EvaluatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherEvaluations::Table, TeacherEvaluations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherEvaluations::Table, TeacherEvaluations::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课堂视频表
        manager
            .create_table(
                Table::create()
                    .table(ClassVideos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassVideos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassVideos::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassVideos::Title).string_len(200).not_null())
                    .col(ColumnDef::new(ClassVideos::Description).text().null())
                    .col(ColumnDef::new(ClassVideos::Subject).string_len(100).not_null())
                    .col(ColumnDef::new(ClassVideos::Semester).integer().null())
                    .col(ColumnDef::new(ClassVideos::VideoFile).string_len(500).null())
                    .col(ColumnDef::new(ClassVideos::VideoUrl).string_len(500).null())
                    .col(ColumnDef::new(ClassVideos::DurationMinutes).integer().null())
                    .col(
                        ColumnDef::new(ClassVideos::UploadedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassVideos::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassVideos::Table, ClassVideos::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师二维码令牌表
        manager
            .create_table(
                Table::create()
                    .table(ProfessorQrTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessorQrTokens::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::ProfessorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::Token)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::ExpiresAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ProfessorQrTokens::Uses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfessorQrTokens::Table, ProfessorQrTokens::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建文档库表
        manager
            .create_table(
                Table::create()
                    .table(RepositoryDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepositoryDocuments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepositoryDocuments::Description).text().null())
                    .col(
                        ColumnDef::new(RepositoryDocuments::AuthorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::DocumentType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::PdfFile)
                            .string_len(500)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::ExternalUrl)
                            .string_len(500)
                            .null(),
                    )
                    .col(ColumnDef::new(RepositoryDocuments::Isbn).string_len(20).null())
                    .col(
                        ColumnDef::new(RepositoryDocuments::PublicationDate)
                            .string_len(10)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::UploadedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::Downloads)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RepositoryDocuments::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(RepositoryDocuments::Keywords).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepositoryDocuments::Table, RepositoryDocuments::AuthorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 同一学生在同一学期对同一教师只能评价一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_student_professor_period")
                    .table(TeacherEvaluations::Table)
                    .col(TeacherEvaluations::StudentId)
                    .col(TeacherEvaluations::ProfessorId)
                    .col(TeacherEvaluations::AcademicPeriod)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_professor_id")
                    .table(TeacherEvaluations::Table)
                    .col(TeacherEvaluations::ProfessorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_videos_professor_id")
                    .table(ClassVideos::Table)
                    .col(ClassVideos::ProfessorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qr_tokens_professor_id")
                    .table(ProfessorQrTokens::Table)
                    .col(ProfessorQrTokens::ProfessorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_pdf_file")
                    .table(RepositoryDocuments::Table)
                    .col(RepositoryDocuments::PdfFile)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_category")
                    .table(RepositoryDocuments::Table)
                    .col(RepositoryDocuments::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(RepositoryDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfessorQrTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassVideos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Cedula,
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
    Address,
    Semester,
    PasswordHash,
    RegisteredAt,
    Active,
}

#[derive(DeriveIden)]
enum Professors {
    #[sea_orm(iden = "professors")]
    Table,
    Id,
    Cedula,
    FirstName,
    LastName,
    Email,
    Phone,
    Department,
    Subjects,
    ExperienceYears,
    AcademicTitle,
    PasswordHash,
    RegisteredAt,
    Active,
}

#[derive(DeriveIden)]
enum TeacherEvaluations {
    #[sea_orm(iden = "teacher_evaluations")]
    Table,
    Id,
    StudentId,
    ProfessorId,
    SubjectMastery,
    ExplanationClarity,
    Punctuality,
    Availability,
    Methodology,
    Overall,
    PositiveAspects,
    ImprovementAspects,
    GeneralComments,
    Recommendation,
    Semester,
    AcademicPeriod,
    EvaluatedAt,
}

#[derive(DeriveIden)]
enum ClassVideos {
    #[sea_orm(iden = "class_videos")]
    Table,
    Id,
    ProfessorId,
    Title,
    Description,
    Subject,
    Semester,
    VideoFile,
    VideoUrl,
    DurationMinutes,
    UploadedAt,
    Active,
}

#[derive(DeriveIden)]
enum ProfessorQrTokens {
    #[sea_orm(iden = "professor_qr_tokens")]
    Table,
    Id,
    ProfessorId,
    Token,
    CreatedAt,
    ExpiresAt,
    Active,
    Uses,
}

#[derive(DeriveIden)]
enum RepositoryDocuments {
    #[sea_orm(iden = "repository_documents")]
    Table,
    Id,
    Title,
    Description,
    AuthorId,
    DocumentType,
    Category,
    PdfFile,
    ExternalUrl,
    Isbn,
    PublicationDate,
    UploadedAt,
    Downloads,
    Active,
    Keywords,
}
